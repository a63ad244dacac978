//! Observable values: a current value plus any number of subscribers

use tokio::sync::watch;

/// A value the presentation layer can read or watch for changes
#[derive(Debug)]
pub struct Signal<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> Signal<T> {
    pub fn new(initial: T) -> Self {
        Self {
            sender: watch::Sender::new(initial),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Publish a new value, waking subscribers even when there are none yet
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

impl<T: Clone + Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
