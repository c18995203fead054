use serde::{Deserialize, Serialize};

/// A menu entry. Prices are in so'm, the smallest currency unit used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image: String,
}

/// Payload for adding a food to the menu.
#[derive(Debug, Clone)]
pub struct FoodCreate {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image: String,
}

/// Payload for editing a menu entry.
#[derive(Debug, Clone, Default)]
pub struct FoodPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub image: Option<String>,
}

impl FoodCreate {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: i64, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            image: image.into(),
        }
    }
}

/// The menu the storefront opens with.
pub fn default_catalog() -> Vec<FoodCreate> {
    vec![
        FoodCreate::new(
            "Osh (Palov)",
            "An'anaviy o'zbek oshi, mol go'shti bilan",
            35000,
            "https://images.unsplash.com/photo-1630409351217-bc4fa6422075?w=400&h=300&fit=crop",
        ),
        FoodCreate::new(
            "Lag'mon",
            "Qo'lda tayyorlangan lag'mon, sabzavotlar bilan",
            28000,
            "https://images.unsplash.com/photo-1569718212165-3a8278d5f624?w=400&h=300&fit=crop",
        ),
        FoodCreate::new(
            "Manti",
            "Mol go'shtli manti, 5 dona",
            25000,
            "https://images.unsplash.com/photo-1534422298391-e4f8c172dddb?w=400&h=300&fit=crop",
        ),
        FoodCreate::new(
            "Shashlik",
            "Mol go'shti shashlik, 200g",
            45000,
            "https://images.unsplash.com/photo-1555939594-58d7cb561ad1?w=400&h=300&fit=crop",
        ),
        FoodCreate::new(
            "Somsa",
            "Go'shtli somsa, 3 dona",
            15000,
            "https://images.unsplash.com/photo-1509722747041-616f39b57569?w=400&h=300&fit=crop",
        ),
        FoodCreate::new(
            "Chuchvara",
            "Mol go'shtli chuchvara, sho'rva bilan",
            22000,
            "https://images.unsplash.com/photo-1496116218417-1a781b1c416c?w=400&h=300&fit=crop",
        ),
    ]
}
