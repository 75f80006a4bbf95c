use serde::Serialize;

use crate::game::scoring::VpBreakdown;
use crate::game::state::GameState;
use crate::types::Color;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub seat: usize,
    pub color: Color,
    pub display: u32,
    pub longest_road: usize,
    pub knights: u32,
    pub breakdown: VpBreakdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub viewer: usize,
    pub players: Vec<PlayerReport>,
    pub winner: Option<Color>,
}

impl ScoreReport {
    /// Scores every seat as `viewer` sees them: only the viewer's own hidden
    /// points are revealed in `display`.
    pub fn build(state: &GameState, viewer: usize) -> Self {
        let players = state
            .players
            .iter()
            .enumerate()
            .map(|(seat, player)| PlayerReport {
                seat,
                color: player.color,
                display: state
                    .victory_points_for_display(seat, viewer)
                    .map_or(0, |vp| vp.display),
                longest_road: state.longest_road_length(seat),
                knights: player.knights_played,
                breakdown: VpBreakdown::of(player),
            })
            .collect();
        Self {
            viewer,
            players,
            winner: state
                .winner()
                .and_then(|idx| state.player(idx).map(|p| p.color)),
        }
    }
}

pub fn print_report(report: &ScoreReport) {
    println!(
        "{:<6} {:<8} {:>4} {:>6} {:>6} {:>6} {:>6} {:>7}",
        "SEAT", "COLOR", "VP", "SETT", "CITY", "ROAD", "ARMY", "HIDDEN"
    );
    println!("{}", "-".repeat(60));
    for row in &report.players {
        let marker = |held: u32| if held > 0 { '*' } else { ' ' };
        let hidden = if row.seat == report.viewer {
            row.breakdown.hidden.to_string()
        } else {
            "?".to_string()
        };
        println!(
            "{:<6} {:<8} {:>4} {:>6} {:>6} {:>5}{} {:>5}{} {:>7}",
            row.seat,
            row.color.to_string(),
            row.display,
            row.breakdown.settlements,
            row.breakdown.cities,
            row.longest_road,
            marker(row.breakdown.longest_road),
            row.knights,
            marker(row.breakdown.largest_army),
            hidden,
        );
    }
    match report.winner {
        Some(color) => println!("\nWinner: {color}"),
        None => println!("\nNo winner yet"),
    }
}
