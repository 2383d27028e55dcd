use crate::model::RosterEntry;

/// Marker line separating roster sections in the input file.
const SECTION_MARKER: &str = "ipc-image src";

/// Parsed actress/actor roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub actresses: Vec<RosterEntry>,
    pub actors: Vec<RosterEntry>,
}

/// Parse the semi-structured roster text. The file carries exactly two
/// marker-delimited sections; assignment is positional: the first marker
/// opens the actress list, the second the actor list. Lines before the first
/// marker are ignored; blank and malformed lines are skipped. Never fails.
pub fn parse_roster(text: &str) -> Roster {
    let mut actresses = Vec::new();
    let mut actors = Vec::new();
    let mut markers_seen = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.contains(SECTION_MARKER) {
            markers_seen += 1;
            continue;
        }
        let target = match markers_seen {
            0 => continue,
            1 => &mut actresses,
            _ => &mut actors,
        };
        if let Some(entry) = parse_line(line) {
            target.push(entry);
        }
    }

    if markers_seen != 2 {
        tracing::warn!(markers = markers_seen, "roster did not contain exactly two sections");
    }

    Roster { actresses, actors }
}

// "img<TAB>name" or a bare name with no image.
fn parse_line(line: &str) -> Option<RosterEntry> {
    let mut parts = line.splitn(2, '\t');
    let first = parts.next()?.trim();
    match parts.next() {
        Some(name) => {
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(RosterEntry {
                name: name.to_string(),
                img: first.to_string(),
            })
        }
        None => {
            if first.is_empty() {
                return None;
            }
            Some(RosterEntry {
                name: first.to_string(),
                img: String::new(),
            })
        }
    }
}
