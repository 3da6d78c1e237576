//! The session coordinator: ties the state store, persistence bridge and
//! player registry together behind the operations the UI and keyboard call.
//!
//! Every mutator synchronously performs its side effects — the persistence
//! write and any registry reconciliation — before returning, so the address
//! fragment is authoritative after each observable step. Nothing here is
//! reactive; the write-after-mutate contract is explicit in each method.

use crate::host::Host;
use crate::keys::{self, Command, DispatchCtx, KeyEvent};
use crate::parser::parse_stream_id;
use crate::persist::fragment;
use crate::persist::{Profile, ProfileStore};
use crate::players::{PlayerApi, PlayerRegistry, ReadySignal};
use crate::store::{GridStore, LayoutItem, Snapshot};

/// Transient toolbar position in viewport pixels. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarPos {
    pub x: f64,
    pub y: f64,
}

/// Cursor offset captured at press time so the toolbar tracks the grab
/// point, not the cursor.
#[derive(Debug, Clone, Copy)]
struct DragOffset {
    dx: f64,
    dy: f64,
}

pub struct Session {
    store: GridStore,
    players: PlayerRegistry,
    ready_signal: Option<ReadySignal>,
    profiles: ProfileStore,
    host: Box<dyn Host>,
    focus: Option<usize>,
    edit_mode: bool,
    /// Load-before-persist gate: no encode may reach the host until the
    /// initial fragment decode has been attempted, otherwise a fast
    /// default-empty encode would overwrite a meaningful link unread.
    loaded: bool,
    viewport: (f64, f64),
    toolbar: ToolbarPos,
    toolbar_drag: Option<DragOffset>,
}

impl Session {
    pub fn new(
        host: Box<dyn Host>,
        api: Box<dyn PlayerApi>,
        profiles: ProfileStore,
        viewport: (f64, f64),
    ) -> Self {
        let (players, ready_signal) = PlayerRegistry::new(api);
        Session {
            store: GridStore::new(),
            players,
            ready_signal: Some(ready_signal),
            profiles,
            host,
            focus: None,
            edit_mode: false,
            loaded: false,
            viewport,
            toolbar: ToolbarPos {
                x: viewport.0 / 2.0 - 100.0,
                y: 20.0,
            },
            toolbar_drag: None,
        }
    }

    // --- Read accessors ---

    pub fn streams(&self) -> &[String] {
        self.store.streams()
    }

    pub fn layout(&self) -> &[LayoutItem] {
        self.store.layout()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn toolbar_pos(&self) -> ToolbarPos {
        self.toolbar
    }

    /// Row height the rendering widget should use for the fixed six-row
    /// viewport split.
    pub fn row_height(&self) -> f64 {
        self.viewport.1 / 6.0
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    // --- Lifecycle ---

    /// Seed state from the address fragment present at load. A fragment that
    /// fails to decode is ignored and the session stays empty. Either way
    /// this opens the persistence gate, so it must run before any mutator.
    pub fn load_from_fragment(&mut self, fragment_str: &str) {
        if !fragment_str.is_empty() {
            match fragment::decode(fragment_str) {
                Some(snapshot) => {
                    eprintln!(
                        "[multiwatch] restored {} stream(s) from the address fragment",
                        snapshot.streams.len()
                    );
                    self.store.restore(snapshot);
                }
                None => eprintln!("[multiwatch] address fragment is not decodable, starting empty"),
            }
        }
        self.loaded = true;
        self.sync_players();
    }

    /// The host fires the player capability's one-shot readiness signal
    /// here, once per session; queued handle constructions replay in order.
    pub fn player_capability_ready(&mut self) {
        if let Some(signal) = self.ready_signal.take() {
            signal.fire();
            self.players.pump();
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
    }

    // --- Grid mutators (each persists before returning) ---

    pub fn add_cell(&mut self) {
        self.store.add_cell();
        self.persist();
    }

    pub fn update_stream(&mut self, idx: usize, raw: &str) {
        if idx >= self.store.len() {
            return;
        }
        self.store.update_stream(idx, raw);
        self.persist();
        self.sync_players();
    }

    /// Blank one slot. The handle is destroyed *before* the slot is
    /// cleared; the reverse order would orphan it.
    pub fn clear_stream(&mut self, idx: usize) {
        if idx >= self.store.len() {
            return;
        }
        self.players.destroy(idx);
        self.store.update_stream(idx, "");
        self.persist();
    }

    /// Remove one slot entirely. Destroys its handle first, re-keys the
    /// surviving handles, then splices the store. Focus on the deleted slot
    /// clears; focus below it shifts down so it keeps naming the same slot.
    pub fn delete_cell(&mut self, idx: usize) {
        if idx >= self.store.len() {
            return;
        }
        self.players.destroy(idx);
        self.players.shift_down(idx);
        self.store.delete_cell(idx);
        self.focus = match self.focus {
            Some(f) if f == idx => None,
            Some(f) if f > idx => Some(f - 1),
            other => other,
        };
        self.persist();
    }

    /// The rendering widget reported a drag/resize outcome.
    pub fn set_layout(&mut self, layout: Vec<LayoutItem>) {
        self.store.set_layout(layout);
        self.persist();
    }

    pub fn reset_layout_only(&mut self) {
        self.store.reset_layout_only();
        self.persist();
        self.host.notify("Layout has been reset.");
    }

    pub fn reset_all(&mut self) {
        self.players.destroy_all();
        self.store.reset_all();
        self.focus = None;
        self.persist();
        self.host.notify("All settings have been reset.");
    }

    // --- Keyboard ---

    /// Route a key event and apply the resulting command. Returns whether
    /// the event was consumed, in which case the host should suppress its
    /// default behavior.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let ctx = DispatchCtx {
            stream_count: self.store.len(),
            focus: self.focus,
            edit_mode: self.edit_mode,
        };
        match keys::route(event, &ctx) {
            Some(command) => {
                self.apply(command);
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ToggleMuteAll => self.players.toggle_mute_all(),
            Command::TogglePlayAll => self.players.toggle_play_all(),
            Command::FocusNext => {
                let len = self.store.len();
                if len > 0 {
                    self.focus = Some(self.focus.map_or(0, |f| (f + 1) % len));
                }
            }
            Command::FocusPrev => {
                let len = self.store.len();
                if len > 0 {
                    self.focus = Some(self.focus.map_or(len - 1, |f| (f + len - 1) % len));
                }
            }
            Command::ClearFocused => {
                if let Some(f) = self.focus {
                    self.clear_stream(f);
                }
            }
            Command::DeleteFocused => {
                if let Some(f) = self.focus {
                    self.delete_cell(f);
                }
            }
            Command::EnterEditMode => {
                self.edit_mode = true;
                eprintln!("[multiwatch] edit mode: on");
            }
            Command::ExitEditMode => {
                self.edit_mode = false;
                eprintln!("[multiwatch] edit mode: off");
            }
            Command::ResetLayout => {
                if self.host.confirm("Reset the layout to the default arrangement?") {
                    self.reset_layout_only();
                }
            }
            Command::ResetAll => {
                if self.host.confirm("Reset everything? All streams will be removed.") {
                    self.reset_all();
                }
            }
            Command::AddCell => self.add_cell(),
            Command::MoveFocused { dx, dy } => {
                if let Some(f) = self.focus {
                    self.store.move_item(f, dx, dy);
                    self.persist();
                }
            }
            Command::ResizeFocused { dw, dh } => {
                if let Some(f) = self.focus {
                    self.store.resize_item(f, dw, dh);
                    self.persist();
                }
            }
        }
    }

    // --- Audio / focus routing ---

    /// Hovering a cell solos its audio.
    pub fn on_hover(&mut self, idx: usize) {
        self.players.solo(idx);
    }

    /// Window blur or tab hidden: everything goes silent.
    pub fn on_window_blur_or_hidden(&mut self) {
        self.players.mute_all();
    }

    // --- Profiles ---

    pub fn save_profile(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let snapshot = self.store.snapshot();
        let share_url = format!("{}#{}", self.host.share_base(), fragment::encode(&snapshot));
        let profile = Profile {
            streams: snapshot.streams,
            layout: snapshot.layout,
            share_url,
        };
        match self.profiles.save(name, &profile) {
            Ok(()) => self.host.notify(&format!("Profile \"{name}\" saved!")),
            Err(e) => eprintln!("[multiwatch] profile save failed: {e}"),
        }
    }

    pub fn load_profile(&mut self, name: &str) {
        match self.profiles.load(name) {
            Ok(Some(profile)) => {
                self.store.restore(Snapshot {
                    streams: profile.streams,
                    layout: profile.layout,
                });
                self.persist();
                self.sync_players();
                self.host.notify(&format!("Profile \"{name}\" loaded!"));
            }
            Ok(None) => self.host.notify(&format!("Profile \"{name}\" not found.")),
            Err(e) => eprintln!("[multiwatch] profile load failed: {e}"),
        }
    }

    pub fn delete_profile(&mut self, name: &str) {
        match self.profiles.delete(name) {
            Ok(_) => self.host.notify(&format!("Profile \"{name}\" deleted.")),
            Err(e) => eprintln!("[multiwatch] profile delete failed: {e}"),
        }
    }

    pub fn list_profiles(&self) -> Vec<String> {
        match self.profiles.list() {
            Ok(names) => names,
            Err(e) => {
                eprintln!("[multiwatch] profile list failed: {e}");
                Vec::new()
            }
        }
    }

    /// Copy a saved profile's baked-in share link.
    pub fn copy_share_link(&mut self, name: &str) {
        match self.profiles.load(name) {
            Ok(Some(profile)) if !profile.share_url.is_empty() => {
                self.host.copy_to_clipboard(&profile.share_url);
                self.host.notify("Share link copied!");
            }
            Ok(_) => self.host.notify("No share link found."),
            Err(e) => eprintln!("[multiwatch] profile load failed: {e}"),
        }
    }

    /// Copy a link to the live session as it stands right now.
    pub fn copy_current_link(&mut self) {
        let url = format!(
            "{}#{}",
            self.host.share_base(),
            fragment::encode(&self.store.snapshot())
        );
        self.host.copy_to_clipboard(&url);
        self.host.notify("URL copied to clipboard!");
    }

    // --- Toolbar drag gesture ---
    //
    // One gesture spans exactly press..release; moves outside a gesture are
    // ignored, so no position mutation can happen after release.

    pub fn toolbar_press(&mut self, cursor_x: f64, cursor_y: f64) {
        self.toolbar_drag = Some(DragOffset {
            dx: cursor_x - self.toolbar.x,
            dy: cursor_y - self.toolbar.y,
        });
    }

    pub fn toolbar_move(&mut self, cursor_x: f64, cursor_y: f64) {
        if let Some(offset) = self.toolbar_drag {
            self.toolbar = ToolbarPos {
                x: cursor_x - offset.dx,
                y: cursor_y - offset.dy,
            };
        }
    }

    pub fn toolbar_release(&mut self) {
        self.toolbar_drag = None;
    }

    // --- Internals ---

    fn persist(&self) {
        if !self.loaded {
            return;
        }
        self.host.set_fragment(&fragment::encode(&self.store.snapshot()));
    }

    /// Reconcile the registry with the current identifier list: request a
    /// handle for every slot whose parsed id is non-empty. Handles are never
    /// destroyed here; only an explicit clear or delete does that.
    fn sync_players(&mut self) {
        for idx in 0..self.store.len() {
            let id = parse_stream_id(&self.store.streams()[idx]);
            self.players.ensure(idx, &id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Key;
    use crate::players::{PlaybackState, PlayerHandle};
    use std::cell::RefCell;
    use std::rc::Rc;

    const ID_A: &str = "aaaaaaaaaaa";
    const ID_B: &str = "bbbbbbbbbbb";

    #[derive(Default)]
    struct HostLog {
        fragments: Vec<String>,
        notifications: Vec<String>,
        clipboard: Vec<String>,
        confirm_answer: bool,
        confirms: usize,
    }

    #[derive(Clone, Default)]
    struct TestHost(Rc<RefCell<HostLog>>);

    impl Host for TestHost {
        fn set_fragment(&self, encoded: &str) {
            self.0.borrow_mut().fragments.push(encoded.to_string());
        }
        fn share_base(&self) -> String {
            "https://example.test/grid".to_string()
        }
        fn notify(&self, message: &str) {
            self.0.borrow_mut().notifications.push(message.to_string());
        }
        fn copy_to_clipboard(&self, text: &str) {
            self.0.borrow_mut().clipboard.push(text.to_string());
        }
        fn confirm(&self, _prompt: &str) -> bool {
            let mut log = self.0.borrow_mut();
            log.confirms += 1;
            log.confirm_answer
        }
    }

    #[derive(Debug, Default)]
    struct HandleState {
        muted: bool,
        playing: bool,
        destroyed: bool,
    }

    struct TestHandle(Rc<RefCell<HandleState>>);

    impl PlayerHandle for TestHandle {
        fn mute(&mut self) {
            self.0.borrow_mut().muted = true;
        }
        fn un_mute(&mut self) {
            self.0.borrow_mut().muted = false;
        }
        fn is_muted(&self) -> bool {
            self.0.borrow().muted
        }
        fn play(&mut self) {
            self.0.borrow_mut().playing = true;
        }
        fn pause(&mut self) {
            self.0.borrow_mut().playing = false;
        }
        fn state(&self) -> PlaybackState {
            if self.0.borrow().playing {
                PlaybackState::Playing
            } else {
                PlaybackState::Paused
            }
        }
        fn destroy(&mut self) {
            self.0.borrow_mut().destroyed = true;
        }
    }

    #[derive(Clone, Default)]
    struct TestApi {
        created: Rc<RefCell<Vec<String>>>,
        handles: Rc<RefCell<Vec<Rc<RefCell<HandleState>>>>>,
    }

    impl PlayerApi for TestApi {
        fn construct(&self, _container_id: &str, video_id: &str) -> Box<dyn PlayerHandle> {
            self.created.borrow_mut().push(video_id.to_string());
            let state = Rc::new(RefCell::new(HandleState::default()));
            self.handles.borrow_mut().push(state.clone());
            Box::new(TestHandle(state))
        }
    }

    fn temp_profiles(tag: &str) -> ProfileStore {
        let path = std::env::temp_dir().join(format!(
            "multiwatch-session-{tag}-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        ProfileStore::new(path)
    }

    fn session(tag: &str) -> (Session, TestHost, TestApi) {
        let host = TestHost::default();
        let api = TestApi::default();
        let session = Session::new(
            Box::new(host.clone()),
            Box::new(api.clone()),
            temp_profiles(tag),
            (1920.0, 1080.0),
        );
        (session, host, api)
    }

    /// A session that has already passed the load gate and whose player
    /// capability is ready.
    fn live_session(tag: &str) -> (Session, TestHost, TestApi) {
        let (mut s, host, api) = session(tag);
        s.load_from_fragment("");
        s.player_capability_ready();
        (s, host, api)
    }

    #[test]
    fn no_encode_before_the_load_gate() {
        let (mut s, host, _) = session("gate");
        s.add_cell();
        s.update_stream(0, ID_A);
        assert!(host.0.borrow().fragments.is_empty());
        s.load_from_fragment("");
        s.add_cell();
        assert_eq!(host.0.borrow().fragments.len(), 1);
    }

    #[test]
    fn malformed_fragment_leaves_default_state() {
        let (mut s, host, _) = session("malformed");
        s.load_from_fragment("%7B%22streams"); // truncated JSON
        assert!(s.streams().is_empty());
        assert!(host.0.borrow().fragments.is_empty());
    }

    #[test]
    fn fragment_round_trips_through_a_session() {
        let (mut s, host, _) = live_session("roundtrip");
        s.add_cell();
        s.update_stream(0, ID_A);
        let encoded = host.0.borrow().fragments.last().cloned().unwrap();

        let (mut s2, _, _) = session("roundtrip2");
        s2.load_from_fragment(&encoded);
        assert_eq!(s2.streams(), s.streams());
        assert_eq!(s2.layout(), s.layout());
    }

    #[test]
    fn every_mutator_persists() {
        let (mut s, host, _) = live_session("persists");
        s.add_cell();
        s.update_stream(0, ID_A);
        s.set_layout(vec![LayoutItem::at_index(0)]);
        s.reset_layout_only();
        s.clear_stream(0);
        s.delete_cell(0);
        assert_eq!(host.0.borrow().fragments.len(), 6);
    }

    #[test]
    fn typing_an_id_creates_a_player() {
        let (mut s, _, api) = live_session("create");
        s.add_cell();
        assert!(api.created.borrow().is_empty());
        s.update_stream(0, &format!("https://youtu.be/{ID_A}"));
        assert_eq!(api.created.borrow().as_slice(), [ID_A]);
    }

    #[test]
    fn players_queue_until_capability_ready() {
        let (mut s, _, api) = session("queue");
        s.load_from_fragment("");
        s.add_cell();
        s.update_stream(0, ID_A);
        assert!(api.created.borrow().is_empty());
        s.player_capability_ready();
        assert_eq!(api.created.borrow().as_slice(), [ID_A]);
    }

    #[test]
    fn clear_destroys_handle_before_blanking_slot() {
        let (mut s, _, api) = live_session("clear");
        s.add_cell();
        s.update_stream(0, ID_A);
        s.clear_stream(0);
        assert!(api.handles.borrow()[0].borrow().destroyed);
        assert_eq!(s.streams()[0], "");
        // The slot is a placeholder again; a new id binds a fresh handle
        s.update_stream(0, ID_B);
        assert_eq!(api.created.borrow().as_slice(), [ID_A, ID_B]);
    }

    #[test]
    fn delete_shifts_focus_and_rekeys_handles() {
        let (mut s, _, api) = live_session("delete");
        for _ in 0..3 {
            s.add_cell();
        }
        s.update_stream(0, ID_A);
        s.update_stream(2, ID_B);
        s.focus = Some(2);
        s.delete_cell(0);
        assert!(api.handles.borrow()[0].borrow().destroyed);
        assert_eq!(s.focus(), Some(1));
        assert_eq!(s.streams().len(), 2);
        // Hovering the shifted slot solos the surviving handle
        s.on_hover(1);
        assert!(!api.handles.borrow()[1].borrow().muted);
    }

    #[test]
    fn deleting_the_focused_slot_clears_focus() {
        let (mut s, _, _) = live_session("focus-clear");
        s.add_cell();
        s.add_cell();
        s.focus = Some(1);
        s.delete_cell(1);
        assert_eq!(s.focus(), None);
    }

    #[test]
    fn tab_cycles_focus() {
        let (mut s, _, _) = live_session("tab");
        for _ in 0..3 {
            s.add_cell();
        }
        assert!(s.handle_key(&KeyEvent::plain(Key::Tab)));
        assert_eq!(s.focus(), Some(0));
        assert!(s.handle_key(&KeyEvent::plain(Key::Tab)));
        assert_eq!(s.focus(), Some(1));
        s.focus = Some(0);
        assert!(s.handle_key(&KeyEvent::shifted(Key::Tab)));
        assert_eq!(s.focus(), Some(2));
    }

    #[test]
    fn tab_with_no_streams_is_not_consumed() {
        let (mut s, _, _) = live_session("tab-empty");
        assert!(!s.handle_key(&KeyEvent::plain(Key::Tab)));
        assert_eq!(s.focus(), None);
    }

    #[test]
    fn shift_arrow_resizes_with_clamp() {
        let (mut s, _, _) = live_session("resize");
        s.add_cell();
        s.apply(Command::EnterEditMode);
        s.focus = Some(0);
        s.apply(Command::ResizeFocused { dw: 2, dh: 0 }); // w: 1 -> 3
        assert!(s.handle_key(&KeyEvent::shifted(Key::ArrowRight)));
        assert_eq!(s.layout()[0].w, 4);
        for _ in 0..5 {
            s.handle_key(&KeyEvent::shifted(Key::ArrowRight));
        }
        assert_eq!(s.layout()[0].w, 6); // clamped at the column count
    }

    #[test]
    fn backspace_destroys_then_clears() {
        let (mut s, _, api) = live_session("backspace");
        s.add_cell();
        s.update_stream(0, ID_A);
        s.focus = Some(0);
        assert!(s.handle_key(&KeyEvent::plain(Key::Backspace)));
        assert!(api.handles.borrow()[0].borrow().destroyed);
        assert_eq!(s.streams()[0], "");
        assert_eq!(s.focus(), Some(0)); // clearing keeps focus, deleting drops it
    }

    #[test]
    fn declined_reset_leaves_state_untouched() {
        let (mut s, host, _) = live_session("declined");
        s.add_cell();
        s.update_stream(0, ID_A);
        let before = host.0.borrow().fragments.len();
        s.apply(Command::ResetAll);
        assert_eq!(host.0.borrow().confirms, 1);
        assert_eq!(s.streams().len(), 1);
        assert_eq!(host.0.borrow().fragments.len(), before);
    }

    #[test]
    fn confirmed_reset_all_destroys_players() {
        let (mut s, host, api) = live_session("confirmed");
        host.0.borrow_mut().confirm_answer = true;
        s.add_cell();
        s.update_stream(0, ID_A);
        s.apply(Command::ResetAll);
        assert!(s.streams().is_empty());
        assert!(api.handles.borrow()[0].borrow().destroyed);
        assert_eq!(
            host.0.borrow().notifications.last().map(String::as_str),
            Some("All settings have been reset.")
        );
    }

    #[test]
    fn hover_and_blur_route_to_the_registry() {
        let (mut s, _, api) = live_session("hover");
        s.add_cell();
        s.add_cell();
        s.update_stream(0, ID_A);
        s.update_stream(1, ID_B);
        s.on_hover(0);
        assert!(!api.handles.borrow()[0].borrow().muted);
        assert!(api.handles.borrow()[1].borrow().muted);
        s.on_window_blur_or_hidden();
        assert!(api.handles.borrow()[0].borrow().muted);
    }

    #[test]
    fn profile_save_load_round_trip() {
        let (mut s, host, _) = live_session("profile");
        s.add_cell();
        s.update_stream(0, ID_A);
        s.save_profile("evening");
        assert_eq!(
            host.0.borrow().notifications.last().map(String::as_str),
            Some("Profile \"evening\" saved!")
        );

        host.0.borrow_mut().confirm_answer = true;
        s.apply(Command::ResetAll);
        assert!(s.streams().is_empty());

        s.load_profile("evening");
        assert_eq!(s.streams(), [ID_A.to_string()]);
        assert_eq!(s.list_profiles(), ["evening"]);
    }

    #[test]
    fn loading_a_missing_profile_mutates_nothing() {
        let (mut s, host, _) = live_session("profile-missing");
        s.add_cell();
        let before = host.0.borrow().fragments.len();
        s.load_profile("nope");
        assert_eq!(s.streams().len(), 1);
        assert_eq!(host.0.borrow().fragments.len(), before);
        assert_eq!(
            host.0.borrow().notifications.last().map(String::as_str),
            Some("Profile \"nope\" not found.")
        );
    }

    #[test]
    fn share_link_is_baked_in_at_save_time() {
        let (mut s, host, _) = live_session("share");
        s.add_cell();
        s.update_stream(0, ID_A);
        s.save_profile("pinned");
        // Mutating afterwards must not change the stored link
        s.update_stream(0, ID_B);
        s.copy_share_link("pinned");
        let copied = host.0.borrow().clipboard.last().cloned().unwrap();
        let frag = copied.split_once('#').unwrap().1.to_string();
        let snap = fragment::decode(&frag).unwrap();
        assert_eq!(snap.streams, [ID_A.to_string()]);
    }

    #[test]
    fn copy_share_link_for_unknown_profile_notifies() {
        let (mut s, host, _) = live_session("share-missing");
        s.copy_share_link("ghost");
        assert!(host.0.borrow().clipboard.is_empty());
        assert_eq!(
            host.0.borrow().notifications.last().map(String::as_str),
            Some("No share link found.")
        );
    }

    #[test]
    fn toolbar_gesture_spans_press_to_release() {
        let (mut s, _, _) = live_session("toolbar");
        let start = s.toolbar_pos();
        // Grab the toolbar 5px inside its corner and drag
        s.toolbar_press(start.x + 5.0, start.y + 5.0);
        s.toolbar_move(start.x + 105.0, start.y + 55.0);
        assert_eq!(
            s.toolbar_pos(),
            ToolbarPos { x: start.x + 100.0, y: start.y + 50.0 }
        );
        s.toolbar_release();
        // Moves after release are ignored
        s.toolbar_move(0.0, 0.0);
        assert_eq!(
            s.toolbar_pos(),
            ToolbarPos { x: start.x + 100.0, y: start.y + 50.0 }
        );
    }

    #[test]
    fn toolbar_defaults_above_viewport_center() {
        let (s, _, _) = session("toolbar-default");
        assert_eq!(s.toolbar_pos(), ToolbarPos { x: 1920.0 / 2.0 - 100.0, y: 20.0 });
    }
}
