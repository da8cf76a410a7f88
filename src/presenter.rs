//! Plain-text rendering of battle snapshots for the terminal driver.

use crate::animation::AttackAnimation;
use crate::battle::state::{BattleSnapshot, Side};
use crate::combatant::Combatant;

const HP_BAR_WIDTH: usize = 20;

/// Renders an HP bar such as `[##########----------]  89/178`.
pub fn hp_bar(combatant: &Combatant) -> String {
    let filled = if combatant.max_hp() == 0 {
        0
    } else {
        ((combatant.hp() as f64 / combatant.max_hp() as f64) * HP_BAR_WIDTH as f64).round()
            as usize
    };
    let filled = filled.min(HP_BAR_WIDTH);
    format!(
        "[{}{}] {:>3}/{}",
        "#".repeat(filled),
        "-".repeat(HP_BAR_WIDTH - filled),
        combatant.hp(),
        combatant.max_hp()
    )
}

/// Name, type badges and HP bar of one combatant.
pub fn display_combatant(combatant: &Combatant) -> String {
    let badges: Vec<String> = combatant
        .types()
        .iter()
        .map(|element| format!("{} {}", element.badge(), element))
        .collect();
    format!(
        "{} ({})\n  HP {} ({}%)",
        combatant.name(),
        badges.join(" / "),
        hp_bar(combatant),
        combatant.hp_percent()
    )
}

/// The player's move list, numbered from 1. `legal` marks which slots can be
/// chosen right now; unavailable slots are shown greyed out with `x`.
pub fn display_moves(combatant: &Combatant, legal: &[bool]) -> String {
    let mut output = String::new();
    for (index, move_data) in combatant.moves().iter().enumerate() {
        let marker = if legal.get(index).copied().unwrap_or(false) {
            format!("{}", index + 1)
        } else {
            "x".to_string()
        };
        let detail = if move_data.is_healing() {
            "heal".to_string()
        } else {
            format!(
                "pow {} acc {}%",
                move_data.power,
                (move_data.accuracy * 100.0).round()
            )
        };
        output.push_str(&format!(
            "  [{}] {:<18} {:<9} {}\n",
            marker, move_data.name, move_data.element, detail
        ));
    }
    output
}

/// One line describing the attack in flight, if any.
pub fn display_animation(animation: &AttackAnimation) -> String {
    let arrow = match animation.side {
        Side::Left => "-->",
        Side::Right => "<--",
    };
    format!("  {} {}", arrow, animation.glyphs().join(" "))
}

/// The whole screen: opponent on top, player below, then the status line,
/// the move list and the narration log (newest first).
pub fn render_screen(snapshot: &BattleSnapshot, legal: &[bool]) -> String {
    let mut output = String::new();
    output.push_str(&display_combatant(&snapshot.right));
    output.push('\n');
    if let Some(animation) = &snapshot.animation {
        output.push_str(&display_animation(animation));
        output.push('\n');
    }
    output.push_str(&display_combatant(&snapshot.left));
    output.push_str("\n\n");
    output.push_str(&snapshot.status_text());
    output.push_str("\n\n");

    if snapshot.winner.is_none() {
        output.push_str(&display_moves(&snapshot.left, legal));
        output.push('\n');
    }

    output.push_str("--- Battle Log ---\n");
    for line in &snapshot.recent_events {
        output.push_str(&format!("  {}\n", line));
    }
    output
}
