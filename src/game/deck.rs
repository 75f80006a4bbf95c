use rand::seq::SliceRandom;

use crate::types::DevelopmentCard;

#[derive(Debug, Clone)]
pub struct DevelopmentDeck {
    cards: Vec<DevelopmentCard>,
}

impl DevelopmentDeck {
    pub fn standard(rng: &mut impl rand::Rng) -> Self {
        let mut cards = build_development_deck();
        cards.shuffle(rng);
        Self { cards }
    }

    pub fn draw(&mut self) -> Option<DevelopmentCard> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn build_development_deck() -> Vec<DevelopmentCard> {
    use DevelopmentCard::*;
    const DISTRIBUTION: &[(DevelopmentCard, usize)] = &[
        (Knight, 14),
        (VictoryPoint, 5),
        (RoadBuilding, 2),
        (YearOfPlenty, 2),
        (Monopoly, 2),
    ];

    let mut deck = Vec::with_capacity(25);
    for (card, count) in DISTRIBUTION {
        deck.extend(std::iter::repeat(*card).take(*count));
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn standard_deck_has_five_victory_points() {
        let mut deck = DevelopmentDeck::standard(&mut StdRng::seed_from_u64(7));
        assert_eq!(deck.len(), 25);
        let mut drawn = Vec::new();
        while let Some(card) = deck.draw() {
            drawn.push(card);
        }
        assert!(deck.is_empty());
        let vps = drawn
            .iter()
            .filter(|c| matches!(c, DevelopmentCard::VictoryPoint))
            .count();
        assert_eq!(vps, 5);
    }
}
