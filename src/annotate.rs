//! The annotation pass: pure text transformation, no I/O.
//!
//! One forward pass over the source lines builds the output plus a list of
//! [`Effect`]s - the controller commands that accompany the inserted
//! comments, recorded as data so a separate dispatcher can send them. Trigger
//! detection is plain substring containment, not G-code-aware parsing: a
//! token like `M104` matches even inside unrelated text, and the pass keeps
//! no state beyond the single start-inserted flag.

use crate::controller::ChamberCommand;
use crate::filament::FilamentProfile;

/// Heating commands that mark the start of a print.
const HEAT_START_TOKENS: [&str; 4] = ["M140", "M190", "M104", "M109"];

/// A controller command tied to the output line it annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    /// Index into the output lines, at the comment the command accompanies.
    pub line: usize,
    pub command: ChamberCommand,
}

/// Result of one annotation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Output lines, each carrying its own terminator where it has one.
    pub lines: Vec<String>,
    /// Controller commands in emission order.
    pub effects: Vec<Effect>,
}

fn is_heat_start(line: &str) -> bool {
    HEAT_START_TOKENS.iter().any(|token| line.contains(token))
}

fn is_print_end(line: &str) -> bool {
    line.contains("M84") || (line.contains("End of") && line.to_lowercase().contains("code"))
}

/// Annotate `lines` for the given filament profile. Input lines are expected
/// to keep their terminators (as produced by `str::split_inclusive('\n')`)
/// and are copied through byte-for-byte; inserted lines are LF-terminated.
///
/// The start block is inserted at most once, immediately before the first
/// heat-start line. The cooldown block is inserted after every matching
/// print-end line; re-running the pass on its own output duplicates blocks,
/// because the original trigger lines still match.
pub fn annotate(lines: &[&str], profile: &FilamentProfile, controller_host: &str) -> Annotation {
    let mut out = Annotation {
        lines: Vec::with_capacity(lines.len()),
        effects: Vec::new(),
    };
    let mut start_inserted = false;

    for line in lines {
        if !start_inserted && is_heat_start(line) {
            emit_start_block(&mut out, profile);
            start_inserted = true;
        }

        out.lines.push((*line).to_string());

        if is_print_end(line) {
            emit_cooldown_block(&mut out, controller_host);
        }
    }

    out
}

fn emit_start_block(out: &mut Annotation, profile: &FilamentProfile) {
    out.lines.push("; === Chamber Controller ===\n".to_string());
    out.lines
        .push(format!("; Detected filament: {}\n", profile.filament));

    if profile.chamber_temp_c > 0 {
        out.push_annotated(
            format!("; Setting chamber to {}°C\n", profile.chamber_temp_c),
            ChamberCommand::ChamberTemp(profile.chamber_temp_c),
        );
    }

    out.push_annotated(
        "; Turning on chamber LEDs\n".to_string(),
        ChamberCommand::Leds(255),
    );
    out.push_annotated(
        "; Starting exhaust fan (30%)\n".to_string(),
        ChamberCommand::ExhaustFan(77),
    );

    out.lines
        .push("; ===================================\n".to_string());
}

fn emit_cooldown_block(out: &mut Annotation, controller_host: &str) {
    out.lines.push("\n".to_string());
    out.lines.push("; === Chamber Cooldown ===\n".to_string());

    out.push_annotated(
        "; Turning off chamber heater\n".to_string(),
        ChamberCommand::ChamberTemp(0),
    );
    out.push_annotated(
        "; Setting exhaust fan to 100% for cooling\n".to_string(),
        ChamberCommand::ExhaustFan(255),
    );

    out.lines
        .push("; Chamber will cool for 2 minutes, then turn off automatically\n".to_string());
    out.lines.push(format!(
        "; (Manual: visit http://{} to control)\n",
        controller_host
    ));
}

impl Annotation {
    fn push_annotated(&mut self, comment: String, command: ChamberCommand) {
        let line = self.lines.len();
        self.lines.push(comment);
        self.effects.push(Effect { line, command });
    }

    /// Concatenate the output lines back into file content.
    pub fn into_content(self) -> String {
        self.lines.concat()
    }
}
