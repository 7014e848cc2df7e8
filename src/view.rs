//! View module.
//! This contains the view to the game world / messages.
//! Rather than printing to the console from each handler, we aggregate
//! structured `ViewItem`s and display them, organized by section, at the end
//! of the turn.

use colored::Colorize;
use textwrap::{fill, termwidth};
use variantly::Variantly;

use crate::style::GameStyle;

/// Where in the turn output an item is rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Section {
    /// Frame of reference: transitions and area descriptions.
    Scene,
    /// Direct results of the player's command.
    Action,
    /// What the locals got up to this turn.
    Activity,
    /// Saves, help, engine chatter.
    System,
}

/// One NPC line in an area description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NpcLine {
    pub name: String,
    pub gang: Option<String>,
    pub down: bool,
}

/// One save slot line in a save listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveLine {
    pub slot: String,
    pub version: String,
    pub modified: String,
}

/// `ViewItems` are each of the various types of information / messages that
/// may be displayed to the player.
#[derive(Clone, Debug, PartialEq, Variantly)]
pub enum ViewItem {
    TransitionMessage(String),
    AreaDescription {
        name: String,
        description: String,
        hazards: Vec<String>,
        items: Vec<String>,
        npcs: Vec<NpcLine>,
        exits: Vec<String>,
    },
    ActionSuccess(String),
    ActionFailure(String),
    Error(String),
    ItemDescription {
        name: String,
        description: String,
        detail: Option<String>,
    },
    InventoryList(Vec<String>),
    NpcSpeech {
        name: String,
        line: String,
    },
    GardenUpdate(String),
    ReportLine(String),
    PlayerHarmed {
        amount: u32,
    },
    CharacterDeath {
        name: String,
        is_player: bool,
    },
    EngineMessage(String),
    GameSaved {
        slot: String,
        file: String,
    },
    GameLoaded {
        slot: String,
        file: String,
    },
    SaveList(Vec<SaveLine>),
    HelpText(Vec<(String, String)>),
}

impl ViewItem {
    fn section(&self) -> Section {
        match self {
            ViewItem::TransitionMessage(_) | ViewItem::AreaDescription { .. } => Section::Scene,
            ViewItem::ActionSuccess(_)
            | ViewItem::ActionFailure(_)
            | ViewItem::Error(_)
            | ViewItem::ItemDescription { .. }
            | ViewItem::InventoryList(_)
            | ViewItem::NpcSpeech { .. }
            | ViewItem::GardenUpdate(_) => Section::Action,
            ViewItem::ReportLine(_) | ViewItem::PlayerHarmed { .. } | ViewItem::CharacterDeath { .. } => {
                Section::Activity
            },
            ViewItem::EngineMessage(_)
            | ViewItem::GameSaved { .. }
            | ViewItem::GameLoaded { .. }
            | ViewItem::SaveList(_)
            | ViewItem::HelpText(_) => Section::System,
        }
    }
}

/// View aggregates information to be displayed on each pass through the REPL
/// and then organizes and displays the result.
#[derive(Clone, Debug, Default)]
pub struct View {
    pub width: usize,
    pub items: Vec<ViewItem>,
}

impl View {
    /// Create a new empty view.
    pub fn new() -> Self {
        Self {
            width: termwidth(),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    /// Compose and display all message contents in the current frame / turn.
    pub fn flush(&mut self) {
        // re-check terminal width in case it's been resized
        self.width = termwidth();
        let items = std::mem::take(&mut self.items);

        let scene: Vec<&ViewItem> = items.iter().filter(|i| i.section() == Section::Scene).collect();
        let action: Vec<&ViewItem> = items.iter().filter(|i| i.section() == Section::Action).collect();
        let activity: Vec<&ViewItem> = items.iter().filter(|i| i.section() == Section::Activity).collect();
        let system: Vec<&ViewItem> = items.iter().filter(|i| i.section() == Section::System).collect();

        if !scene.is_empty() {
            for item in scene {
                self.render_scene(item);
            }
        }
        if !action.is_empty() {
            println!("{:.>width$}", "results".section_style(), width = self.width);
            for item in action {
                self.render_action(item);
            }
        }
        if !activity.is_empty() {
            println!("{:.>width$}", "street".section_style(), width = self.width);
            for item in activity {
                self.render_activity(item);
            }
        }
        if !system.is_empty() {
            println!("{:.>width$}", "game".section_style(), width = self.width);
            for item in system {
                self.render_system(item);
            }
        }
        println!();
    }

    fn fill_width(&self) -> usize {
        self.width.clamp(40, 100)
    }

    fn render_scene(&self, item: &ViewItem) {
        match item {
            ViewItem::TransitionMessage(msg) => {
                println!("\n{}", fill(msg, self.fill_width()).transition_style());
            },
            ViewItem::AreaDescription {
                name,
                description,
                hazards,
                items,
                npcs,
                exits,
            } => {
                println!("\n{}", name.area_titlebar_style().bold());
                println!("{}\n", fill(description, self.fill_width()).description_style());
                for hazard in hazards {
                    println!("{}", format!("⚠ {hazard} is here.").hazard_style());
                }
                if !items.is_empty() {
                    let list = items.join(", ");
                    println!("You see: {}", list.item_style());
                }
                for npc in npcs {
                    let tag = match (&npc.gang, npc.down) {
                        (_, true) => " (down)".dimmed().to_string(),
                        (Some(gang), _) => format!(" [{}]", gang.gang_style()),
                        (None, false) => String::new(),
                    };
                    println!("{} is here{tag}.", npc.name.npc_style());
                }
                if exits.is_empty() {
                    println!("{}", "No obvious way out.".dimmed());
                } else {
                    println!("Exits: {}", exits.join(", ").as_str().italic());
                }
            },
            _ => {},
        }
    }

    fn render_action(&self, item: &ViewItem) {
        match item {
            ViewItem::ActionSuccess(msg) => println!("{}", fill(msg, self.fill_width())),
            ViewItem::ActionFailure(msg) => println!("{}", fill(msg, self.fill_width()).denied_style()),
            ViewItem::Error(msg) => println!("{} {}", "⚠".error_style(), msg),
            ViewItem::ItemDescription {
                name,
                description,
                detail,
            } => {
                println!("{}", name.item_style().bold());
                println!("{}", fill(description, self.fill_width()).description_style());
                if let Some(text) = detail {
                    println!("{}", fill(text, self.fill_width()).italic());
                }
            },
            ViewItem::InventoryList(names) => {
                println!("{}", "Carrying".subheading_style());
                if names.is_empty() {
                    println!("\t{}", "nothing at all".italic().dimmed());
                }
                for name in names {
                    println!("\t{}", name.item_style());
                }
            },
            ViewItem::NpcSpeech { name, line } => {
                println!("{}: \"{line}\"", name.npc_style());
            },
            ViewItem::GardenUpdate(msg) => println!("{}", fill(msg, self.fill_width()).garden_style()),
            _ => {},
        }
    }

    fn render_activity(&self, item: &ViewItem) {
        match item {
            ViewItem::ReportLine(line) => println!("{}", fill(line, self.fill_width()).report_style()),
            ViewItem::PlayerHarmed { amount } => {
                println!("{}", format!("You take {amount} damage!").error_style());
            },
            ViewItem::CharacterDeath { name, is_player } => {
                if *is_player {
                    println!("{}", "☠ Everything goes dark. Root access revoked.".error_style().bold());
                } else {
                    println!("{}", format!("☠ {name} goes down hard.").report_style());
                }
            },
            _ => {},
        }
    }

    fn render_system(&self, item: &ViewItem) {
        match item {
            ViewItem::EngineMessage(msg) => println!("{}", msg.as_str().italic()),
            ViewItem::GameSaved { slot, file } => {
                println!("Game saved to slot {} ({file}).", slot.as_str().bold());
            },
            ViewItem::GameLoaded { slot, file } => {
                println!("Game loaded from slot {} ({file}).", slot.as_str().bold());
            },
            ViewItem::SaveList(entries) => {
                println!("{}", "Saved games".subheading_style());
                if entries.is_empty() {
                    println!("\t{}", "none found".italic().dimmed());
                }
                for entry in entries {
                    println!("\t{} (v{}, {})", entry.slot.as_str().bold(), entry.version, entry.modified);
                }
            },
            ViewItem::HelpText(entries) => {
                println!("{}", "Commands".subheading_style());
                for (cmd, what) in entries {
                    println!("\t{:<24} {}", cmd.as_str().bold(), what);
                }
            },
            _ => {},
        }
    }
}
