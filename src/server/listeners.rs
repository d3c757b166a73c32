use std::sync::Arc;

use parking_lot::Mutex;

pub type ListenerId = usize;

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Inner<E> {
    next_id: ListenerId,
    listeners: Vec<(ListenerId, Listener<E>)>,
}

/*
Observer list that can be shared between threads. Listeners are called outside of the lock, so
a listener may add or remove listeners (the change applies to the next fire).
 */
pub struct ListenerList<E> {
    inner: Mutex<Inner<E>>,
}

impl<E> Default for ListenerList<E> {
    fn default() -> Self {
        ListenerList {
            inner: Mutex::new(Inner {
                next_id: 1,
                listeners: Vec::new(),
            }),
        }
    }
}

impl<E> ListenerList<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(lid, _)| *lid != id);
        before != inner.listeners.len()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls every listener in registration order, returns how many were called.
    pub fn fire(&self, event: &E) -> usize {
        let snapshot: Vec<Listener<E>> = self
            .inner
            .lock()
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        for listener in snapshot.iter() {
            listener(event);
        }
        snapshot.len()
    }
}
