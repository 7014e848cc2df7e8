//! Command module
//!
//! Describes possible commands used during gameplay.

use variantly;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, variantly::Variantly)]
pub enum Command {
    Attack(String),
    Close(String),
    Drop(String),
    Eat(String),
    Fill(String),
    GiveToNpc { item: String, npc: String },
    Hack,
    Harvest(String),
    Help,
    Hide,
    Inventory,
    ListSaves,
    Load(Option<String>),
    Look,
    LookAt(String),
    MoveTo(String),
    Open(String),
    Plant(String),
    PutIn { item: String, container: String },
    Quit,
    Save(Option<String>),
    Take(String),
    TalkTo(String),
    Throw(String),
    Unknown,
    Water(String),
    // Below available only with the dev-mode feature enabled.
    ListEffects,
    ListNpcs,
    SpawnItem(String),
    Teleport(String),
}

impl Command {
    /// Whether executing this command advances world time (and so triggers
    /// the end-of-turn hazard / behavior / effect ticks).
    pub fn consumes_turn(&self) -> bool {
        match self {
            Command::Attack(_)
            | Command::Close(_)
            | Command::Drop(_)
            | Command::Eat(_)
            | Command::Fill(_)
            | Command::GiveToNpc { .. }
            | Command::Hack
            | Command::Harvest(_)
            | Command::Hide
            | Command::MoveTo(_)
            | Command::Open(_)
            | Command::Plant(_)
            | Command::PutIn { .. }
            | Command::Take(_)
            | Command::TalkTo(_)
            | Command::Throw(_)
            | Command::Water(_) => true,
            Command::Help
            | Command::Inventory
            | Command::ListSaves
            | Command::Load(_)
            | Command::Look
            | Command::LookAt(_)
            | Command::Quit
            | Command::Save(_)
            | Command::Unknown
            | Command::ListEffects
            | Command::ListNpcs
            | Command::SpawnItem(_)
            | Command::Teleport(_) => false,
        }
    }
}

/// Split a word list at the first occurrence of a separator word, joining
/// each side. Used for `give X to Y` and `put X in Y` forms.
fn split_on(words: &[&str], separator: &str) -> Option<(String, String)> {
    let idx = words.iter().position(|w| *w == separator)?;
    let (left, right) = words.split_at(idx);
    let right = &right[1..];
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left.join(" "), right.join(" ")))
}

/// Parses an input string and returns a corresponding `Command` if recognized.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    match words.as_slice() {
        ["look"] | ["look", "around"] => Command::Look,
        ["look", "at" | "in", thing @ ..] if !thing.is_empty() => Command::LookAt(thing.join(" ")),
        ["go" | "move" | "walk", "to", dir @ ..] | ["go" | "move" | "walk" | "enter", dir @ ..] if !dir.is_empty() => {
            Command::MoveTo(dir.join(" "))
        },
        ["take" | "grab" | "get", thing @ ..] if !thing.is_empty() => Command::Take(thing.join(" ")),
        ["drop", thing @ ..] if !thing.is_empty() => Command::Drop(thing.join(" ")),
        ["put" | "place", rest @ ..] => split_on(rest, "in").map_or(Command::Unknown, |(item, container)| {
            Command::PutIn { item, container }
        }),
        ["give" | "hand", rest @ ..] => {
            split_on(rest, "to").map_or(Command::Unknown, |(item, npc)| Command::GiveToNpc { item, npc })
        },
        ["open", thing @ ..] if !thing.is_empty() => Command::Open(thing.join(" ")),
        ["close" | "shut", thing @ ..] if !thing.is_empty() => Command::Close(thing.join(" ")),
        ["inventory" | "inv" | "i"] => Command::Inventory,
        ["talk" | "speak", "to" | "with", npc @ ..] if !npc.is_empty() => Command::TalkTo(npc.join(" ")),
        ["attack" | "fight" | "hit", target @ ..] if !target.is_empty() => Command::Attack(target.join(" ")),
        ["plant" | "sow", seed @ ..] if !seed.is_empty() => Command::Plant(seed.join(" ")),
        ["water", plant @ ..] if !plant.is_empty() => Command::Water(plant.join(" ")),
        ["harvest" | "pick", plant @ ..] if !plant.is_empty() => Command::Harvest(plant.join(" ")),
        ["fill" | "refill", can @ ..] if !can.is_empty() => Command::Fill(can.join(" ")),
        ["eat", crop @ ..] if !crop.is_empty() => Command::Eat(crop.join(" ")),
        ["hack"] => Command::Hack,
        ["throw" | "toss", thing @ ..] if !thing.is_empty() => Command::Throw(thing.join(" ")),
        ["hide"] => Command::Hide,
        ["save"] => Command::Save(None),
        ["save", slot] => Command::Save(Some((*slot).to_string())),
        ["load"] => Command::Load(None),
        ["load", slot] => Command::Load(Some((*slot).to_string())),
        ["saves"] | ["list", "saves"] => Command::ListSaves,
        ["help" | "?"] => Command::Help,
        ["quit" | "exit"] => Command::Quit,
        ["!port", area] if cfg!(feature = "dev-mode") => Command::Teleport((*area).to_string()),
        ["!spawn", item] if cfg!(feature = "dev-mode") => Command::SpawnItem((*item).to_string()),
        ["!npcs"] if cfg!(feature = "dev-mode") => Command::ListNpcs,
        ["!fx"] if cfg!(feature = "dev-mode") => Command::ListEffects,
        _ => Command::Unknown,
    }
}

/// Command / description pairs for the help screen.
pub fn help_entries() -> Vec<(String, String)> {
    let mut entries: Vec<(&str, &str)> = vec![
        ("go to <place>", "move through an exit"),
        ("look / look at <thing>", "survey the area or inspect something"),
        ("take <item> / drop <item>", "pick things up or put them down"),
        ("put <item> in <container>", "stash an item"),
        ("open <thing> / close <thing>", "work a container"),
        ("inventory", "list what you're carrying"),
        ("talk to <npc>", "strike up a conversation"),
        ("give <item> to <npc>", "hand something over"),
        ("attack <npc>", "start trouble"),
        ("plant <seed>", "plant a seed in open soil"),
        ("water <plant>", "water a growing plant"),
        ("harvest <plant>", "harvest a fully grown plant"),
        ("fill <can>", "refill a watering can from a source"),
        ("eat <crop>", "eat something you grew"),
        ("hack", "compromise a fixture in the area"),
        ("throw <item>", "hurl something hazardous"),
        ("hide", "keep out of sight"),
        ("save [slot] / load [slot]", "store or restore the game"),
        ("saves", "list saved games"),
        ("quit", "log out"),
    ];
    if cfg!(feature = "dev-mode") {
        entries.extend([
            ("!port <area>", "teleport (dev)"),
            ("!spawn <item>", "spawn an item template (dev)"),
            ("!npcs", "list NPCs and their state (dev)"),
            ("!fx", "list active effects everywhere (dev)"),
        ]);
    }
    entries
        .into_iter()
        .map(|(c, d)| (c.to_string(), d.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_movement_forms() {
        assert_eq!(parse_command("go to the alley"), Command::MoveTo("the alley".into()));
        assert_eq!(parse_command("go north"), Command::MoveTo("north".into()));
        assert_eq!(parse_command("enter basement"), Command::MoveTo("basement".into()));
    }

    #[test]
    fn parses_multiword_item_names() {
        assert_eq!(parse_command("take watering can"), Command::Take("watering can".into()));
        assert_eq!(parse_command("water carrot plant"), Command::Water("carrot plant".into()));
    }

    #[test]
    fn parses_separator_forms() {
        assert_eq!(
            parse_command("put seed packet in storage crate"),
            Command::PutIn {
                item: "seed packet".into(),
                container: "storage crate".into()
            }
        );
        assert_eq!(
            parse_command("give carrot to wade"),
            Command::GiveToNpc {
                item: "carrot".into(),
                npc: "wade".into()
            }
        );
    }

    #[test]
    fn missing_separator_is_unknown() {
        assert_eq!(parse_command("put seed packet storage"), Command::Unknown);
        assert_eq!(parse_command("give to"), Command::Unknown);
    }

    #[test]
    fn parses_garden_and_chaos_commands() {
        assert_eq!(parse_command("plant carrot seed"), Command::Plant("carrot seed".into()));
        assert_eq!(parse_command("harvest carrot"), Command::Harvest("carrot".into()));
        assert_eq!(parse_command("hack"), Command::Hack);
        assert_eq!(parse_command("throw milk carton"), Command::Throw("milk carton".into()));
    }

    #[test]
    fn parses_system_commands() {
        assert_eq!(parse_command("save"), Command::Save(None));
        assert_eq!(parse_command("save alpha"), Command::Save(Some("alpha".into())));
        assert_eq!(parse_command("load"), Command::Load(None));
        assert_eq!(parse_command("saves"), Command::ListSaves);
        assert_eq!(parse_command("quit"), Command::Quit);
    }

    #[test]
    fn input_is_case_insensitive() {
        assert_eq!(parse_command("TAKE Trowel"), Command::Take("trowel".into()));
    }

    #[test]
    fn gibberish_is_unknown() {
        assert_eq!(parse_command("defragment the mainframe"), Command::Unknown);
        assert_eq!(parse_command(""), Command::Unknown);
    }

    #[test]
    fn system_commands_do_not_consume_turns() {
        assert!(!Command::Look.consumes_turn());
        assert!(!Command::Save(None).consumes_turn());
        assert!(Command::Water("carrot".into()).consumes_turn());
        assert!(Command::Hack.consumes_turn());
    }
}
