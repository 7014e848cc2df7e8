//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn area_style(&self) -> ColoredString;
    fn area_titlebar_style(&self) -> ColoredString;
    fn item_style(&self) -> ColoredString;
    fn npc_style(&self) -> ColoredString;
    fn gang_style(&self) -> ColoredString;
    fn hazard_style(&self) -> ColoredString;
    fn garden_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn transition_style(&self) -> ColoredString;
    fn report_style(&self) -> ColoredString;
    fn status_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn denied_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn section_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn area_style(&self) -> ColoredString {
        self.truecolor(223, 110, 30)
    }
    fn area_titlebar_style(&self) -> ColoredString {
        self.truecolor(223, 110, 30).underline()
    }
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn npc_style(&self) -> ColoredString {
        self.truecolor(13, 150, 70).underline()
    }
    fn gang_style(&self) -> ColoredString {
        self.truecolor(200, 50, 120).bold()
    }
    fn hazard_style(&self) -> ColoredString {
        self.truecolor(230, 80, 80).italic()
    }
    fn garden_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn transition_style(&self) -> ColoredString {
        self.italic().truecolor(150, 150, 200)
    }
    fn report_style(&self) -> ColoredString {
        self.truecolor(180, 180, 120)
    }
    fn status_style(&self) -> ColoredString {
        self.truecolor(180, 120, 220)
    }
    fn error_style(&self) -> ColoredString {
        self.bold().truecolor(230, 80, 80)
    }
    fn denied_style(&self) -> ColoredString {
        self.dimmed().truecolor(200, 90, 90)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(120, 200, 120)
    }
    fn section_style(&self) -> ColoredString {
        let bracketed = format!("[{self}]");
        bracketed.truecolor(75, 80, 75)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
}

impl GameStyle for String {
    fn area_style(&self) -> ColoredString {
        self.as_str().area_style()
    }
    fn area_titlebar_style(&self) -> ColoredString {
        self.as_str().area_titlebar_style()
    }
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn npc_style(&self) -> ColoredString {
        self.as_str().npc_style()
    }
    fn gang_style(&self) -> ColoredString {
        self.as_str().gang_style()
    }
    fn hazard_style(&self) -> ColoredString {
        self.as_str().hazard_style()
    }
    fn garden_style(&self) -> ColoredString {
        self.as_str().garden_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn transition_style(&self) -> ColoredString {
        self.as_str().transition_style()
    }
    fn report_style(&self) -> ColoredString {
        self.as_str().report_style()
    }
    fn status_style(&self) -> ColoredString {
        self.as_str().status_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn denied_style(&self) -> ColoredString {
        self.as_str().denied_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn section_style(&self) -> ColoredString {
        self.as_str().section_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
}
