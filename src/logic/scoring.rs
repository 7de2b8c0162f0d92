// src/logic/scoring.rs
//! 得点計算。どのパイルからどのパイルへ動いたかで点数が決まるよ。🧮

use crate::components::stack::StackType;
use crate::config::ScoreConfig;

/// カードを `from` から `to` へ動かした時の点数の増減。
/// 表に載ってない組み合わせ (場札 → 場札 など) は 0。
pub fn move_score(config: &ScoreConfig, from: StackType, to: StackType) -> i32 {
    match (from, to) {
        (StackType::Waste, StackType::Tableau(_)) => config.waste_to_tableau,
        (StackType::Waste, StackType::Foundation(_)) => config.waste_to_foundation,
        (StackType::Tableau(_), StackType::Foundation(_)) => config.tableau_to_foundation,
        (StackType::Foundation(_), StackType::Tableau(_)) => config.foundation_to_tableau,
        _ => 0,
    }
}

/// 場札の裏向きカードをタップでめくった時。
pub fn flip_score(config: &ScoreConfig) -> i32 {
    config.turn_over_tableau_card
}

/// 捨て札を山札に戻した時。
pub fn recycle_score(config: &ScoreConfig) -> i32 {
    config.recycle_waste
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_move_scores() {
        let config = ScoreConfig::default();
        assert_eq!(move_score(&config, StackType::Waste, StackType::Tableau(3)), 5);
        assert_eq!(move_score(&config, StackType::Waste, StackType::Foundation(0)), 10);
        assert_eq!(move_score(&config, StackType::Tableau(1), StackType::Foundation(2)), 10);
        assert_eq!(move_score(&config, StackType::Foundation(2), StackType::Tableau(6)), -15);
        assert_eq!(move_score(&config, StackType::Tableau(1), StackType::Tableau(2)), 0);
        assert_eq!(move_score(&config, StackType::Foundation(0), StackType::Foundation(1)), 0);
    }

    #[test]
    fn flip_and_recycle_follow_config() {
        let config = ScoreConfig { turn_over_tableau_card: 7, recycle_waste: -20, ..ScoreConfig::default() };
        assert_eq!(flip_score(&config), 7);
        assert_eq!(recycle_score(&config), -20);
    }
}
