use std::process;

use multiwatch::persist::{fragment, ProfileStore};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        usage();
        process::exit(1);
    }

    let profiles = ProfileStore::open_default();

    match (args[0].as_str(), args.get(1).map(String::as_str)) {
        ("decode", Some(link)) => decode(link),
        ("profiles", None) => match profiles.list() {
            Ok(names) => {
                for name in names {
                    println!("{name}");
                }
            }
            Err(e) => {
                eprintln!("failed to read profiles: {e}");
                process::exit(1);
            }
        },
        ("show", Some(name)) => match profiles.load(name) {
            Ok(Some(profile)) => {
                for (idx, (stream, item)) in
                    profile.streams.iter().zip(&profile.layout).enumerate()
                {
                    let content = if stream.is_empty() { "(placeholder)" } else { stream };
                    println!(
                        "[{idx}] at ({},{}) size {}x{}  {content}",
                        item.x, item.y, item.w, item.h
                    );
                }
            }
            Ok(None) => {
                eprintln!("no profile named {name:?}");
                process::exit(1);
            }
            Err(e) => {
                eprintln!("failed to read profiles: {e}");
                process::exit(1);
            }
        },
        ("link", Some(name)) => match profiles.load(name) {
            Ok(Some(profile)) if !profile.share_url.is_empty() => {
                println!("{}", profile.share_url)
            }
            Ok(Some(_)) => {
                eprintln!("profile {name:?} has no share link");
                process::exit(1);
            }
            Ok(None) => {
                eprintln!("no profile named {name:?}");
                process::exit(1);
            }
            Err(e) => {
                eprintln!("failed to read profiles: {e}");
                process::exit(1);
            }
        },
        ("delete", Some(name)) => match profiles.delete(name) {
            Ok(true) => println!("deleted {name:?}"),
            Ok(false) => {
                eprintln!("no profile named {name:?}");
                process::exit(1);
            }
            Err(e) => {
                eprintln!("failed to delete: {e}");
                process::exit(1);
            }
        },
        _ => {
            eprintln!("unknown command: {}", args.join(" "));
            usage();
            process::exit(1);
        }
    }
}

/// Accepts a full share link or just its fragment.
fn decode(link: &str) {
    let frag = match link.split_once('#') {
        Some((_, frag)) => frag,
        None => link,
    };
    match fragment::decode(frag) {
        Some(snapshot) => {
            for (idx, (stream, item)) in
                snapshot.streams.iter().zip(&snapshot.layout).enumerate()
            {
                let content = if stream.is_empty() { "(placeholder)" } else { stream };
                println!(
                    "[{idx}] at ({},{}) size {}x{}  {content}",
                    item.x, item.y, item.w, item.h
                );
            }
        }
        None => {
            eprintln!("not a decodable share link");
            process::exit(1);
        }
    }
}

fn usage() {
    eprintln!("usage: multiwatch-ctl <command>");
    eprintln!();
    eprintln!("commands:");
    eprintln!("  decode <link>    decode a share link and print its grid");
    eprintln!("  profiles         list saved profiles");
    eprintln!("  show <name>      print a saved profile's grid");
    eprintln!("  link <name>      print a saved profile's share link");
    eprintln!("  delete <name>    delete a saved profile");
}
