use rpgnorm::{Classification, Entity, ParseResultVerbose, Reason, Registry, StageTrace};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(system: &str, language: &str, input: &str, res: &ParseResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", input), ansi::CYAN)));
    println!("  {}", palette.dim(format!("system {system} │ language {language}")));

    println!("\n{}", palette.paint("━━━ Stages ━━━", ansi::GRAY));
    for trace in &res.details.stages {
        println!("  {}", fmt_stage(trace, &palette));
    }

    println!("\n{}", palette.paint("━━━ Results ━━━", ansi::GRAY));
    let flavor = &res.flavor;
    if flavor.is_empty() {
        println!("{}", palette.dim("  Nothing recognized"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • The phrases are not in the {language} dictionaries of '{system}'");
        println!("  • The system has no bundle and the generic English mapping was used");
        println!("\n{}", palette.dim("  Tip: Set RUST_LOG=rpgnorm=debug to see which mapping was resolved"));
    } else {
        print_field("roll type", flavor.roll_type.as_deref(), flavor.roll_type_raw.as_deref(), &palette);
        print_field("skill", flavor.skill.as_deref(), flavor.skill_raw.as_deref(), &palette);
        print_field("ability", flavor.ability.as_deref(), flavor.ability_raw.as_deref(), &palette);
        let modifiers = if flavor.modifiers.is_empty() { "-".to_string() } else { flavor.modifiers.join(" ") };
        println!("  {:<10} {}", palette.dim("modifiers"), palette.paint(modifiers, ansi::YELLOW));
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Confidence: {}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.bold(palette.paint(format!("{}/100", flavor.confidence), ansi::CYAN)),
    );
    println!();
}

pub fn print_classification(
    system: &str,
    entity: &Entity,
    included: bool,
    classification: &Classification,
    color: bool,
) {
    let palette = ansi::Palette::new(color);
    let name = entity.name.as_deref().unwrap_or("<unnamed>");
    println!(
        "\n{}",
        palette.bold(palette.paint(format!("⚙  Classifying: {} (type \"{}\")", name, entity.kind), ansi::CYAN))
    );
    println!("  {}", palette.dim(format!("system {system}")));

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    if !included {
        println!("  {}", palette.paint("excluded: this type is never classified", ansi::YELLOW));
    }
    println!(
        "  {} {} {}",
        palette.bold(palette.paint(classification.category.as_str(), ansi::GREEN)),
        palette.dim("│ decided by:"),
        palette.paint(describe_reason(&classification.reason), ansi::BLUE),
    );
    println!();
}

pub fn print_systems(registry: &Registry, color: bool) {
    let palette = ansi::Palette::new(color);

    println!("\n{}", palette.paint("━━━ Classification ━━━", ansi::GRAY));
    for system in registry.supported_systems() {
        let tie_break = registry.resolve_classification(system).tie_break.map(|t| t.name()).unwrap_or("");
        println!("  {:<28} {}", palette.paint(system, ansi::CYAN), palette.dim(tie_break));
    }

    println!("\n{}", palette.paint("━━━ Languages ━━━", ansi::GRAY));
    for system in registry.language_systems() {
        println!("  {:<28} {}", palette.paint(system, ansi::CYAN), palette.dim(registry.languages_for(system).join(", ")));
    }
    println!();
}

fn print_field(label: &str, key: Option<&str>, raw: Option<&str>, palette: &ansi::Palette) {
    match (key, raw) {
        (Some(key), Some(raw)) => println!(
            "  {:<10} {} {}",
            palette.dim(label),
            palette.bold(palette.paint(key, ansi::GREEN)),
            palette.dim(format!("({raw})")),
        ),
        _ => println!("  {:<10} {}", palette.dim(label), palette.dim("-")),
    }
}

fn fmt_stage(trace: &StageTrace, palette: &ansi::Palette) -> String {
    let outcome = match trace.strategy {
        Some(strategy) => palette.paint(format!("✓ {strategy} +{}", trace.points), ansi::GREEN),
        None => palette.dim("✗"),
    };
    format!(
        "{} {} {}",
        palette.paint(format!("{:<10}", trace.stage.as_str()), ansi::BLUE),
        outcome,
        palette.dim(format!("{:?}", trace.duration))
    )
}

fn describe_reason(reason: &Reason) -> String {
    match reason {
        Reason::PlayerOwner => "player owner".to_string(),
        Reason::PcType => "pc type list".to_string(),
        Reason::MonsterType => "monster type list".to_string(),
        Reason::NpcType => "npc type list".to_string(),
        Reason::TieBreak(strategy) => format!("tie-break '{}'", strategy.name()),
        Reason::Fallback => "fallback".to_string(),
        Reason::Absent => "no entity".to_string(),
    }
}
