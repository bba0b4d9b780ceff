//! Seeded outfit sampling and scoring.

use super::{
    BASE_SCORE, MAX_SCORE, Wearable,
    category::{Category, SlotPolicy},
    harmony::{Rgb, harmony_score},
    rng::{DaySeed, Mulberry32},
};

/// Garments grouped by category. Each item lives in exactly one list.
#[derive(Debug)]
pub struct Catalogue<'a, G> {
    lists: [Vec<&'a G>; Category::COUNT],
}

impl<'a, G: Wearable> Catalogue<'a, G> {
    /// Group `items` by their category, preserving input order within a category.
    pub fn partition<I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a G>,
    {
        let mut lists: [Vec<&'a G>; Category::COUNT] = std::array::from_fn(|_| Vec::new());
        for item in items {
            lists[item.category().index()].push(item);
        }
        Self { lists }
    }

    /// Items filed under `category`; empty when the closet has none.
    pub fn items(&self, category: Category) -> &[&'a G] {
        &self.lists[category.index()]
    }

    /// Total number of garments.
    pub fn len(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Whether the catalogue holds no garments at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every required slot can be filled.
    pub fn can_dress(&self) -> bool {
        Category::ALL
            .into_iter()
            .filter(|category| category.policy() == SlotPolicy::Required)
            .all(|category| !self.items(category).is_empty())
    }
}

/// One sampled combination of garments.
#[derive(Debug)]
pub struct Outfit<'a, G> {
    pub top: &'a G,
    pub bottom: &'a G,
    pub shoes: Option<&'a G>,
    pub outerwear: Option<&'a G>,
    pub accessory: Option<&'a G>,
    /// Harmony and completeness score in `[0, 100]`.
    pub score: u8,
}

impl<'a, G> Outfit<'a, G> {
    /// Garment in the slot for `category`, if filled.
    pub fn get(&self, category: Category) -> Option<&'a G> {
        match category {
            Category::Top => Some(self.top),
            Category::Bottom => Some(self.bottom),
            Category::Shoes => self.shoes,
            Category::Outerwear => self.outerwear,
            Category::Accessory => self.accessory,
        }
    }

    /// Filled slots in slot order.
    pub fn pieces(&self) -> impl Iterator<Item = (Category, &'a G)> + '_ {
        Category::ALL
            .into_iter()
            .filter_map(|category| self.get(category).map(|item| (category, item)))
    }
}

impl<G: Wearable> Outfit<'_, G> {
    /// Dominant colors of the filled slots, skipping garments without one.
    pub fn colors(&self) -> Vec<Rgb> {
        self.pieces()
            .filter_map(|(_, item)| item.dominant_color())
            .collect()
    }
}

/// Score an outfit: base points, plus the harmony of every color pair, plus
/// completeness bonuses, clamped to `[0, 100]`.
pub fn score<G: Wearable>(outfit: &Outfit<'_, G>) -> u8 {
    let colors = outfit.colors();
    let harmony: i32 = colors
        .iter()
        .enumerate()
        .flat_map(|(i, a)| colors[i + 1..].iter().map(move |b| harmony_score(*a, *b)))
        .sum();
    let completeness: i32 = outfit
        .pieces()
        .map(|(category, _)| category.completeness_bonus())
        .sum();

    (BASE_SCORE + harmony + completeness).clamp(0, i32::from(MAX_SCORE)) as u8
}

/// Draw `count` candidate outfits for the day and rank them by score.
///
/// Returns an empty list when the catalogue has no tops or no bottoms. Equal
/// scores keep their draw order.
pub fn generate<'a, G: Wearable>(
    catalogue: &Catalogue<'a, G>,
    count: usize,
    seed: DaySeed,
) -> Vec<Outfit<'a, G>> {
    if !catalogue.can_dress() {
        return Vec::new();
    }

    let mut outfits: Vec<Outfit<'a, G>> = (0..count)
        .filter_map(|index| {
            let rng = Mulberry32::new(seed.draw(index as u32));
            draw(catalogue, rng)
        })
        .collect();

    outfits.sort_by(|a, b| b.score.cmp(&a.score));
    outfits
}

/// Fill every slot in category order. Each inclusion check and each pick
/// consumes exactly one value from `rng`.
fn draw<'a, G: Wearable>(
    catalogue: &Catalogue<'a, G>,
    mut rng: Mulberry32,
) -> Option<Outfit<'a, G>> {
    let mut slots: [Option<&'a G>; Category::COUNT] = [None; Category::COUNT];

    for category in Category::ALL {
        let items = catalogue.items(category);
        if items.is_empty() {
            continue;
        }

        let include = match category.policy() {
            SlotPolicy::Required | SlotPolicy::WhenAvailable => true,
            SlotPolicy::Sometimes { threshold } => rng.next_f64() > threshold,
        };
        if include {
            slots[category.index()] = Some(items[rng.pick(items.len())]);
        }
    }

    let [top, bottom, shoes, outerwear, accessory] = slots;
    let mut outfit = Outfit {
        top: top?,
        bottom: bottom?,
        shoes,
        outerwear,
        accessory,
        score: 0,
    };
    outfit.score = score(&outfit);
    Some(outfit)
}
