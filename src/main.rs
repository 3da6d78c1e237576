use std::io::{BufRead, Write as _};

use multiwatch::host::StdHost;
use multiwatch::keys::{Key, KeyEvent};
use multiwatch::parser::parse_stream_id;
use multiwatch::persist::{fragment, ProfileStore};
use multiwatch::players::{PlaybackState, PlayerApi, PlayerHandle};
use multiwatch::session::Session;
use multiwatch::store::GRID_COLS;

const VERSION: &str = env!("MULTIWATCH_VERSION");
const COMMIT: &str = env!("MULTIWATCH_COMMIT");

const SHARE_BASE: &str = "https://multiwatch.local/grid";
const VIEWPORT: (f64, f64) = (1920.0, 1080.0);

// --- Simulated player capability ---
//
// Stands in for the real embedded-player runtime: handles only log their
// transitions and track mute/playback state so solo/mute-all behavior is
// observable from the terminal.

struct SimPlayer {
    container_id: String,
    video_id: String,
    muted: bool,
    state: PlaybackState,
}

impl PlayerHandle for SimPlayer {
    fn mute(&mut self) {
        if !self.muted {
            self.muted = true;
            eprintln!("[multiwatch] {} ({}): muted", self.container_id, self.video_id);
        }
    }

    fn un_mute(&mut self) {
        if self.muted {
            self.muted = false;
            eprintln!("[multiwatch] {} ({}): unmuted", self.container_id, self.video_id);
        }
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn play(&mut self) {
        self.state = PlaybackState::Playing;
        eprintln!("[multiwatch] {} ({}): playing", self.container_id, self.video_id);
    }

    fn pause(&mut self) {
        self.state = PlaybackState::Paused;
        eprintln!("[multiwatch] {} ({}): paused", self.container_id, self.video_id);
    }

    fn state(&self) -> PlaybackState {
        self.state
    }

    fn destroy(&mut self) {
        eprintln!("[multiwatch] {} ({}): destroyed", self.container_id, self.video_id);
    }
}

struct SimPlayerApi;

impl PlayerApi for SimPlayerApi {
    fn construct(&self, container_id: &str, video_id: &str) -> Box<dyn PlayerHandle> {
        eprintln!("[multiwatch] {container_id}: embedding video {video_id}");
        Box::new(SimPlayer {
            container_id: container_id.to_string(),
            video_id: video_id.to_string(),
            muted: false,
            state: PlaybackState::Unstarted,
        })
    }
}

// --- Terminal frontend ---

fn render(session: &Session) {
    let streams = session.streams();
    let layout = session.layout();
    if streams.is_empty() {
        println!("(empty grid)");
        return;
    }
    println!("grid ({GRID_COLS} columns), {} cell(s):", streams.len());
    for (idx, (raw, item)) in streams.iter().zip(layout).enumerate() {
        let focus_mark = if session.focus() == Some(idx) { "*" } else { " " };
        let id = parse_stream_id(raw);
        let content = if raw.is_empty() {
            "(placeholder)".to_string()
        } else if id.is_empty() {
            format!("{raw:?} (unrecognized)")
        } else {
            id
        };
        println!(
            " {focus_mark}[{idx}] at ({},{}) size {}x{}  {content}",
            item.x, item.y, item.w, item.h
        );
    }
    if session.edit_mode() {
        println!("edit mode is on");
    }
}

/// Parse a chord like "m", "shift+tab" or "alt+r" into a key event.
fn parse_chord(chord: &str) -> Option<KeyEvent> {
    let mut shift = false;
    let mut alt = false;
    let mut key = None;
    for part in chord.split('+') {
        match part.to_ascii_lowercase().as_str() {
            "shift" => shift = true,
            "alt" => alt = true,
            "space" => key = Some(Key::Space),
            "tab" => key = Some(Key::Tab),
            "backspace" => key = Some(Key::Backspace),
            "delete" | "del" => key = Some(Key::Delete),
            "up" => key = Some(Key::ArrowUp),
            "down" => key = Some(Key::ArrowDown),
            "left" => key = Some(Key::ArrowLeft),
            "right" => key = Some(Key::ArrowRight),
            single if single.chars().count() == 1 => {
                key = single.chars().next().map(Key::Char);
            }
            other => {
                eprintln!("[multiwatch] unknown key: {other:?}");
                return None;
            }
        }
    }
    key.map(|key| KeyEvent {
        key,
        shift,
        alt,
        in_text_input: false,
    })
}

fn usage() {
    println!("commands:");
    println!("  add                 append an empty cell");
    println!("  set <idx> <url>     assign a stream URL or id to a cell");
    println!("  clear <idx>         blank a cell, keeping its slot");
    println!("  del <idx>           remove a cell entirely");
    println!("  key <chord>         send a keyboard chord (e.g. m, shift+tab, alt+r)");
    println!("  hover <idx>         solo a cell's audio");
    println!("  blur                simulate window blur (mute everything)");
    println!("  ready               fire the player capability readiness signal");
    println!("  save <name>         save the current arrangement as a profile");
    println!("  load <name>         load a saved profile");
    println!("  delete <name>       delete a saved profile");
    println!("  profiles            list saved profiles");
    println!("  share <name>        copy a profile's share link");
    println!("  link                copy a link to the current arrangement");
    println!("  show                print the grid");
    println!("  url                 print the current address");
    println!("  help                this text");
    println!("  quit                exit");
}

/// Accept either a full share link or a bare fragment.
fn fragment_of(arg: &str) -> &str {
    match arg.split_once('#') {
        Some((_, frag)) => frag,
        None => arg,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--version") {
        println!("multiwatch {VERSION} ({COMMIT})");
        return;
    }

    eprintln!("[multiwatch] multiwatch {VERSION} ({COMMIT})");

    let host = StdHost::new(SHARE_BASE);
    let profiles = ProfileStore::open_default();
    let mut session = Session::new(
        Box::new(host),
        Box::new(SimPlayerApi),
        profiles,
        VIEWPORT,
    );

    // Seed from a share link passed on the command line, as a fragment in a
    // real address bar would.
    let initial = args.first().map(|a| fragment_of(a)).unwrap_or("");
    session.load_from_fragment(initial);
    session.player_capability_ready();
    render(&session);

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("[multiwatch] stdin read failed: {e}");
                break;
            }
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        match (cmd, rest) {
            ("quit" | "exit", _) => break,
            ("help", _) => usage(),
            ("show", _) => render(&session),
            ("url", _) => {
                println!("{SHARE_BASE}#{}", fragment::encode(&session.snapshot()));
            }
            ("add", _) => {
                session.add_cell();
                render(&session);
            }
            ("set", rest) => match rest.split_once(' ') {
                Some((idx, url)) => match idx.parse::<usize>() {
                    Ok(idx) => {
                        session.update_stream(idx, url.trim());
                        render(&session);
                    }
                    Err(_) => eprintln!("[multiwatch] not an index: {idx:?}"),
                },
                None => eprintln!("[multiwatch] usage: set <idx> <url>"),
            },
            ("clear", idx) => match idx.parse::<usize>() {
                Ok(idx) => {
                    session.clear_stream(idx);
                    render(&session);
                }
                Err(_) => eprintln!("[multiwatch] not an index: {idx:?}"),
            },
            ("del", idx) => match idx.parse::<usize>() {
                Ok(idx) => {
                    session.delete_cell(idx);
                    render(&session);
                }
                Err(_) => eprintln!("[multiwatch] not an index: {idx:?}"),
            },
            ("key", chord) => {
                if let Some(event) = parse_chord(chord) {
                    if session.handle_key(&event) {
                        render(&session);
                    } else {
                        eprintln!("[multiwatch] key not handled here");
                    }
                }
            }
            ("hover", idx) => match idx.parse::<usize>() {
                Ok(idx) => session.on_hover(idx),
                Err(_) => eprintln!("[multiwatch] not an index: {idx:?}"),
            },
            ("blur", _) => session.on_window_blur_or_hidden(),
            ("ready", _) => session.player_capability_ready(),
            ("save", name) if !name.is_empty() => session.save_profile(name),
            ("load", name) if !name.is_empty() => {
                session.load_profile(name);
                render(&session);
            }
            ("delete", name) if !name.is_empty() => session.delete_profile(name),
            ("profiles", _) => {
                let names = session.list_profiles();
                if names.is_empty() {
                    println!("(no saved profiles)");
                } else {
                    for name in names {
                        println!("{name}");
                    }
                }
            }
            ("share", name) if !name.is_empty() => session.copy_share_link(name),
            ("link", _) => session.copy_current_link(),
            (other, _) => {
                eprintln!("[multiwatch] unknown command: {other:?} (try 'help')");
            }
        }
    }
}
