//! Registry of external video-player handles, keyed by slot index.
//!
//! Every call into the player capability is a request, not a confirmation:
//! queried state (`is_muted`, `state`) may lag the true external state and
//! nothing here blocks waiting for an acknowledgment.

use std::collections::{BTreeMap, VecDeque};

use futures::channel::oneshot;

/// Playback state as reported by a player handle. Reports may lag
/// just-issued commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Unstarted,
    Playing,
    Paused,
    Buffering,
    Ended,
}

/// Capability object bound to one embedded player.
pub trait PlayerHandle {
    fn mute(&mut self);
    fn un_mute(&mut self);
    fn is_muted(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn state(&self) -> PlaybackState;
    /// Tear down the embedded player. Called exactly once, right before the
    /// handle is dropped from the registry.
    fn destroy(&mut self);
}

/// The external player capability: builds a handle for a video id inside a
/// named container.
pub trait PlayerApi {
    fn construct(&self, container_id: &str, video_id: &str) -> Box<dyn PlayerHandle>;
}

/// One-shot readiness signal for the player capability, fired exactly once
/// per session by the embedding host. Requests issued before it fires are
/// queued and replayed in original call order.
pub struct ReadySignal(oneshot::Sender<()>);

impl ReadySignal {
    pub fn fire(self) {
        let _ = self.0.send(());
    }
}

/// `index -> handle` map, reactive to the current list of parsed ids.
pub struct PlayerRegistry {
    api: Box<dyn PlayerApi>,
    handles: BTreeMap<usize, Box<dyn PlayerHandle>>,
    pending: VecDeque<(usize, String)>,
    ready_rx: Option<oneshot::Receiver<()>>,
    ready: bool,
}

impl PlayerRegistry {
    pub fn new(api: Box<dyn PlayerApi>) -> (Self, ReadySignal) {
        let (tx, rx) = oneshot::channel();
        let registry = PlayerRegistry {
            api,
            handles: BTreeMap::new(),
            pending: VecDeque::new(),
            ready_rx: Some(rx),
            ready: false,
        };
        (registry, ReadySignal(tx))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.handles.contains_key(&index)
    }

    /// Make sure a handle exists for `index` when `id` is non-empty. Before
    /// the capability signals readiness the request is queued; afterwards it
    /// constructs immediately. An existing handle is left alone even if the
    /// id changed — handles die only through an explicit clear or delete.
    pub fn ensure(&mut self, index: usize, id: &str) {
        if id.is_empty() || self.handles.contains_key(&index) {
            return;
        }
        self.pump();
        if self.ready {
            self.construct(index, id);
        } else if !self.pending.iter().any(|(i, _)| *i == index) {
            self.pending.push_back((index, id.to_string()));
        }
    }

    /// Poll the one-shot readiness channel; on resolution, replay queued
    /// construction requests in their original order.
    pub fn pump(&mut self) {
        if self.ready {
            return;
        }
        let Some(rx) = self.ready_rx.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(Some(())) => {
                self.ready = true;
                self.ready_rx = None;
                eprintln!("[multiwatch] player capability ready, replaying {} queued request(s)", self.pending.len());
                while let Some((index, id)) = self.pending.pop_front() {
                    if !self.handles.contains_key(&index) {
                        self.construct(index, id.as_str());
                    }
                }
            }
            Ok(None) => {}
            Err(oneshot::Canceled) => {
                // Signal owner dropped without firing; keep queueing forever,
                // the capability is best-effort anyway.
                self.ready_rx = None;
                eprintln!("[multiwatch] player readiness signal lost");
            }
        }
    }

    fn construct(&mut self, index: usize, id: &str) {
        let handle = self.api.construct(&format!("player-{index}"), id);
        eprintln!("[multiwatch] player {index}: created for '{id}'");
        self.handles.insert(index, handle);
    }

    /// Hover "solo" semantics: mute everything except `index`, un-mute
    /// `index`. Independent per call; no memory of the previous hover.
    pub fn solo(&mut self, index: usize) {
        for (i, handle) in self.handles.iter_mut() {
            if *i == index {
                handle.un_mute();
            } else {
                handle.mute();
            }
        }
    }

    /// Mute every handle unconditionally (window blur / tab hidden),
    /// overriding any hover-induced unmute.
    pub fn mute_all(&mut self) {
        for handle in self.handles.values_mut() {
            handle.mute();
        }
    }

    /// Flip each handle's mute state based on its own `is_muted` query.
    /// There is no global mute flag; handles can end up in mixed states.
    pub fn toggle_mute_all(&mut self) {
        for handle in self.handles.values_mut() {
            if handle.is_muted() {
                handle.un_mute();
            } else {
                handle.mute();
            }
        }
    }

    /// Per handle: playing pauses, everything else plays. No majority vote,
    /// no anchor handle.
    pub fn toggle_play_all(&mut self) {
        for handle in self.handles.values_mut() {
            if handle.state() == PlaybackState::Playing {
                handle.pause();
            } else {
                handle.play();
            }
        }
    }

    /// Destroy and drop the handle for `index`, if any. Must run before the
    /// owning slot is cleared or removed, else the handle is orphaned.
    pub fn destroy(&mut self, index: usize) {
        if let Some(mut handle) = self.handles.remove(&index) {
            handle.destroy();
            eprintln!("[multiwatch] player {index}: destroyed");
        }
        self.pending.retain(|(i, _)| *i != index);
    }

    /// Re-key surviving handles after the slot at `removed` was spliced out,
    /// keeping the 1:1 index binding true. The caller destroys the removed
    /// slot's handle first.
    pub fn shift_down(&mut self, removed: usize) {
        let tail = self.handles.split_off(&removed);
        for (i, handle) in tail {
            self.handles.insert(i - 1, handle);
        }
        for (i, _) in self.pending.iter_mut() {
            if *i > removed {
                *i -= 1;
            }
        }
    }

    /// Destroy every handle and drop the queue (session reset).
    pub fn destroy_all(&mut self) {
        for (_, mut handle) in std::mem::take(&mut self.handles) {
            handle.destroy();
        }
        self.pending.clear();
    }
}
