use crate::error::{Result, TutorError};
use crate::input::note_from_midi;
use crate::layout::Note;
use std::sync::mpsc;

const CLIENT_NAME: &str = "pianotype";

fn client() -> Result<midir::MidiInput> {
    midir::MidiInput::new(CLIENT_NAME).map_err(|e| TutorError::Midi(e.to_string()))
}

/// Connected MIDI input ports.
///
/// midir delivers messages on its own thread; they are forwarded raw over a
/// channel and filtered on the caller's thread in [`MidiInput::drain`].
pub struct MidiInput {
    /// Kept alive so the callbacks keep firing.
    #[allow(dead_code)]
    connections: Vec<midir::MidiInputConnection<()>>,
    event_rx: mpsc::Receiver<Vec<u8>>,
    port_names: Vec<String>,
}

impl MidiInput {
    /// Connect to every input port, or only those whose name contains `filter`.
    pub fn open(filter: Option<&str>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let mut connections = Vec::new();
        let mut port_names = Vec::new();

        let midi_in = client()?;

        for port in &midi_in.ports() {
            let name = midi_in
                .port_name(port)
                .unwrap_or_else(|_| "unknown".to_string());
            if filter.is_some_and(|f| !name.contains(f)) {
                continue;
            }

            // Each connection consumes its own client.
            let port_client = client()?;
            let tx = event_tx.clone();
            match port_client.connect(
                port,
                &name,
                move |_timestamp, message, _| {
                    let _ = tx.send(message.to_vec());
                },
                (),
            ) {
                Ok(conn) => {
                    log::info!("listening on MIDI port {}", name);
                    connections.push(conn);
                    port_names.push(name);
                }
                Err(e) => log::warn!("skipping MIDI port {}: {}", name, e),
            }
        }

        Ok(Self {
            connections,
            event_rx,
            port_names,
        })
    }

    pub fn port_names(&self) -> &[String] {
        &self.port_names
    }

    /// Notes pressed since the last call, in arrival order.
    pub fn drain(&self) -> Vec<Note> {
        self.event_rx
            .try_iter()
            .filter_map(|message| note_from_midi(&message))
            .collect()
    }
}

/// Names of the MIDI input ports currently visible to the system.
pub fn list_ports() -> Result<Vec<String>> {
    let midi_in = client()?;
    Ok(midi_in
        .ports()
        .iter()
        .map(|p| midi_in.port_name(p).unwrap_or_else(|_| "unknown".to_string()))
        .collect())
}
