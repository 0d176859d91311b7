//! Serializers that make store behavior observable in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use extras_core::{CborSerializer, ExtrasId, ExtrasSerializer, Key};

/// Shared call counts of a [`CountingSerializer`].
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    serialize: Arc<AtomicUsize>,
    deserialize: Arc<AtomicUsize>,
}

impl CallCounter {
    pub fn serializations(&self) -> usize {
        self.serialize.load(Ordering::SeqCst)
    }

    pub fn deserializations(&self) -> usize {
        self.deserialize.load(Ordering::SeqCst)
    }
}

/// Delegates to `S` and counts every call.
#[derive(Debug, Clone)]
pub struct CountingSerializer<S = CborSerializer> {
    inner: S,
    counter: CallCounter,
}

impl<S> CountingSerializer<S> {
    pub fn new(inner: S) -> (Self, CallCounter) {
        let counter = CallCounter::default();
        (
            Self {
                inner,
                counter: counter.clone(),
            },
            counter,
        )
    }
}

impl<T, S> ExtrasSerializer<T> for CountingSerializer<S>
where
    S: ExtrasSerializer<T>,
{
    fn serialize(&self, key: &Key<T>, value: &T) -> extras_core::Result<Vec<u8>> {
        self.counter.serialize.fetch_add(1, Ordering::SeqCst);
        self.inner.serialize(key, value)
    }

    fn deserialize(&self, key: &Key<T>, bytes: &[u8]) -> Option<T> {
        self.counter.deserialize.fetch_add(1, Ordering::SeqCst);
        self.inner.deserialize(key, bytes)
    }
}

/// Encodes with CBOR but never accepts a payload back, like a consumer
/// reading bytes written by an incompatible producer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectingSerializer;

impl<T> ExtrasSerializer<T> for RejectingSerializer
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    fn serialize(&self, key: &Key<T>, value: &T) -> extras_core::Result<Vec<u8>> {
        CborSerializer.serialize(key, value)
    }

    fn deserialize(&self, _key: &Key<T>, _bytes: &[u8]) -> Option<T> {
        None
    }
}

/// Test-side handle of a [`GatedSerializer`].
pub struct Gate {
    entered: Receiver<ExtrasId>,
    release: Sender<()>,
}

impl Gate {
    /// Wait until a deserialization has started, returning its identity.
    pub fn wait_entered(&self, timeout: Duration) -> Option<ExtrasId> {
        match self.entered.recv_timeout(timeout) {
            Ok(id) => Some(id),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Let one blocked deserialization finish.
    pub fn release(&self) {
        // The serializer may already be gone; nothing left to release then.
        let _ = self.release.send(());
    }
}

/// A serializer whose `deserialize` blocks until the [`Gate`] releases it.
pub struct GatedSerializer<S = CborSerializer> {
    inner: S,
    entered: Mutex<Sender<ExtrasId>>,
    release: Mutex<Receiver<()>>,
}

/// Wrap `inner` so each deserialization waits for [`Gate::release`].
pub fn gated<S>(inner: S) -> (GatedSerializer<S>, Gate) {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    (
        GatedSerializer {
            inner,
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
        },
        Gate {
            entered: entered_rx,
            release: release_tx,
        },
    )
}

impl<T, S> ExtrasSerializer<T> for GatedSerializer<S>
where
    S: ExtrasSerializer<T>,
{
    fn serialize(&self, key: &Key<T>, value: &T) -> extras_core::Result<Vec<u8>> {
        self.inner.serialize(key, value)
    }

    fn deserialize(&self, key: &Key<T>, bytes: &[u8]) -> Option<T> {
        let _ = self.entered.lock().expect("gate sender").send(key.id());
        let _ = self.release.lock().expect("gate receiver").recv();
        self.inner.deserialize(key, bytes)
    }
}
