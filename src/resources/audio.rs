//! Bridge between the simulation and the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread;
//! it returns the [`AudioBridge`] that owns the thread handle and an
//! [`AudioSink`] that systems use to send commands. Call [`shutdown_audio`]
//! during teardown to stop the thread.
//!
//! A sink without a channel swallows every command, which is what headless
//! tests want.

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;

use crate::events::audio::{AudioCmd, Channel};

const DEFAULT_VOLUME: f32 = 1.0;
const CENTER_PAN: f32 = 0.5;

/// Fire-and-forget sender for [`AudioCmd`]s.
#[derive(Debug, Clone, Default)]
pub struct AudioSink {
    tx_cmd: Option<Sender<AudioCmd>>,
}

impl AudioSink {
    /// Sink that drops every command.
    pub fn silent() -> Self {
        Self { tx_cmd: None }
    }

    pub fn new(tx_cmd: Sender<AudioCmd>) -> Self {
        Self {
            tx_cmd: Some(tx_cmd),
        }
    }

    /// Sink plus the receiving end, for callers that consume commands
    /// themselves.
    pub fn channel() -> (Self, Receiver<AudioCmd>) {
        let (tx, rx) = unbounded();
        (Self::new(tx), rx)
    }

    pub fn send(&self, cmd: AudioCmd) {
        if let Some(tx) = &self.tx_cmd {
            // Ignore send error on shutdown
            let _ = tx.send(cmd);
        }
    }

    /// Play a one-shot effect at full volume, centred.
    pub fn play(&self, id: &str) {
        self.play_on(id, Channel::Effects);
    }

    pub fn play_on(&self, id: &str, channel: Channel) {
        debug!("play fx {id} on {channel:?}");
        self.send(AudioCmd::PlayFx {
            id: id.to_string(),
            pan: CENTER_PAN,
            volume: DEFAULT_VOLUME,
            channel,
        });
    }

    pub fn pause(&self, channel: Channel) {
        self.send(AudioCmd::PauseChannel { channel });
    }
}

/// Owner of the background audio thread.
pub struct AudioBridge {
    tx_cmd: Sender<AudioCmd>,
    handle: std::thread::JoinHandle<()>,
}

/// Spawn `audio_thread` with a fresh command channel.
pub fn setup_audio<F>(audio_thread: F) -> (AudioBridge, AudioSink)
where
    F: FnOnce(Receiver<AudioCmd>) + Send + 'static,
{
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let handle = std::thread::spawn(move || audio_thread(rx_cmd));
    let sink = AudioSink::new(tx_cmd.clone());
    (AudioBridge { tx_cmd, handle }, sink)
}

/// Send [`AudioCmd::Shutdown`] and wait for the thread to exit.
pub fn shutdown_audio(bridge: AudioBridge) {
    let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
    let _ = bridge.handle.join();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_sink_drops_commands() {
        let sink = AudioSink::silent();
        sink.play("Jump");
    }

    #[test]
    fn test_channel_sink_delivers_play() {
        let (sink, rx) = AudioSink::channel();
        sink.play("Zap");
        sink.pause(Channel::Movement);
        let cmds: Vec<AudioCmd> = rx.try_iter().collect();
        assert_eq!(cmds.len(), 2);
        assert!(matches!(&cmds[0], AudioCmd::PlayFx { id, channel: Channel::Effects, .. } if id == "Zap"));
        assert_eq!(
            cmds[1],
            AudioCmd::PauseChannel {
                channel: Channel::Movement
            }
        );
    }

    #[test]
    fn test_setup_and_shutdown_joins_thread() {
        let (done_tx, done_rx) = unbounded();
        let (bridge, sink) = setup_audio(move |rx| {
            let mut played = 0;
            for cmd in rx.iter() {
                match cmd {
                    AudioCmd::PlayFx { .. } => played += 1,
                    AudioCmd::Shutdown => break,
                    _ => {}
                }
            }
            let _ = done_tx.send(played);
        });
        sink.play("Pickup");
        shutdown_audio(bridge);
        assert_eq!(done_rx.recv().unwrap(), 1);
    }
}
