use regex::Regex;

/// "Skill Check: Perception", "Test de compétence : Discrétion", "Perception Check".
///
/// Applied to the lowercased text in order; group 1 is the candidate phrase.
pub fn skill_check() -> [&'static Regex; 2] {
    [
        regex!(r"(?i)(?:skill\s*check|test\s*de\s*compétence|check|test)[\s:]+(\w[\w\s]*?)(?:\s*\(|$|\s*-|\s*:)"),
        regex!(r"(?i)(\w[\w\s]*?)\s+(?:check|test|roll|jet)"),
    ]
}

/// "Saving Throw: Dexterity", "Dexterity Save", "Jet de sauvegarde : Force".
pub fn saving_throw() -> [&'static Regex; 2] {
    [
        regex!(r"(?i)(?:saving\s*throw|jet\s*de\s*sauvegarde|save)[\s:]+(\w+)"),
        regex!(r"(?i)(\w+)\s+(?:save|saving\s*throw)"),
    ]
}

/// Signed integer literal with an optional trailing qualifier: "+2 bonus", "-1 malus", "(+3)".
///
/// Digits are ASCII only; the literal must parse as an integer.
pub fn modifier() -> &'static Regex {
    regex!(r"(?i)([+-][0-9]+)(?:\s*(?:bonus|penalty|malus|modifier))?")
}

/// Every `(...)` group, left to right.
pub fn parenthetical() -> &'static Regex {
    regex!(r"\(([^)]+)\)")
}

/// Text before the first colon: "Acrobatics: DC 15".
pub fn colon_prefix() -> &'static Regex {
    regex!(r"^([^:]+):")
}
