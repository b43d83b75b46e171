//! Log capture shared by unit tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// In-memory writer shared between threads, locked per write like stdout.
#[derive(Clone, Default)]
pub(crate) struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A plain-text fmt subscriber (INFO and above) writing into `sink`.
pub(crate) fn capturing_dispatch(sink: &SharedSink) -> tracing::Dispatch {
    let writer = sink.clone();
    tracing::Dispatch::new(
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish(),
    )
}
