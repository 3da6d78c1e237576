//! The narrow seam between the engine and whatever embeds it: address bar,
//! notifications, clipboard, confirmation prompts. All calls are
//! fire-and-forget from the engine's point of view.

use std::cell::RefCell;
use std::io::{BufRead, Write};

pub trait Host {
    /// Write the encoded session into the address fragment. Last write wins;
    /// no acknowledgment.
    fn set_fragment(&self, encoded: &str);

    /// Origin plus path of the current page, without fragment — the prefix a
    /// share link is built from.
    fn share_base(&self) -> String;

    /// Show a short, transient message to the user.
    fn notify(&self, message: &str);

    /// Best-effort clipboard write.
    fn copy_to_clipboard(&self, text: &str);

    /// Ask the user to confirm a destructive action. `false` leaves state
    /// untouched.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Terminal-backed host for the interactive binary: the "address bar" is a
/// remembered string, notifications go to stderr, clipboard goes through
/// wl-copy when available, confirmations read a line from stdin.
pub struct StdHost {
    share_base: String,
    fragment: RefCell<String>,
}

impl StdHost {
    pub fn new(share_base: impl Into<String>) -> Self {
        StdHost {
            share_base: share_base.into(),
            fragment: RefCell::new(String::new()),
        }
    }

    /// The most recently written fragment (what the address bar would show).
    pub fn fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    pub fn current_url(&self) -> String {
        let frag = self.fragment.borrow();
        if frag.is_empty() {
            self.share_base.clone()
        } else {
            format!("{}#{}", self.share_base, frag)
        }
    }
}

impl Host for StdHost {
    fn set_fragment(&self, encoded: &str) {
        *self.fragment.borrow_mut() = encoded.to_string();
    }

    fn share_base(&self) -> String {
        self.share_base.clone()
    }

    fn notify(&self, message: &str) {
        eprintln!("[multiwatch] {message}");
    }

    fn copy_to_clipboard(&self, text: &str) {
        let text = text.to_string();
        std::thread::spawn(move || {
            match std::process::Command::new("wl-copy").arg(&text).status() {
                Ok(s) if s.success() => eprintln!("[multiwatch] copied to clipboard"),
                Ok(s) => eprintln!("[multiwatch] wl-copy exited: {s}"),
                Err(e) => eprintln!("[multiwatch] wl-copy failed: {e}"),
            }
        });
    }

    fn confirm(&self, prompt: &str) -> bool {
        eprint!("[multiwatch] {prompt} [y/N] ");
        let _ = std::io::stderr().flush();
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }
}
