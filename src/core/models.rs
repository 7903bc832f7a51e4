use std::{
    collections::BTreeMap,
    sync::Arc,
};

use serde::Deserialize;

pub const ENGLISH: &str = "en";
pub const MISSING_MEASURE: &str = "-";

/// Localized preparation text keyed by lowercase language code.
///
/// English is always present and is the fallback for every other code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructions {
    by_language: BTreeMap<String, String>,
}

impl Instructions {
    pub fn new(english: String) -> Self {
        let mut by_language = BTreeMap::new();
        by_language.insert(ENGLISH.to_string(), english);
        Self { by_language }
    }

    fn insert_variant(&mut self, language: &str, text: Option<String>) {
        if let Some(text) = non_blank(text) {
            self.by_language.insert(language.to_ascii_lowercase(), text);
        }
    }

    /// Text for `language`, falling back to English.
    pub fn get(&self, language: &str) -> &str {
        self.by_language
            .get(&language.to_ascii_lowercase())
            .or_else(|| self.by_language.get(ENGLISH))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn has_translation(&self, language: &str) -> bool {
        self.by_language.contains_key(&language.to_ascii_lowercase())
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.by_language.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRow {
    pub ingredient: String,
    pub measure: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawDrink")]
pub struct Drink {
    pub id: String,
    pub name: String,
    pub category: String,
    pub alcoholic: String,
    pub glass: String,
    pub ingredients: Vec<String>,
    pub measures: Vec<String>,
    pub image_url: String,
    pub instructions: Instructions,
    image_data: Option<Arc<Vec<u8>>>,
}

impl Drink {
    pub fn image_data(&self) -> Option<&Arc<Vec<u8>>> {
        self.image_data.as_ref()
    }

    /// Fills the image slot. Returns `false` and keeps the first image if the
    /// slot was already filled.
    pub fn set_image_data(&mut self, data: Arc<Vec<u8>>) -> bool {
        if self.image_data.is_some() {
            return false;
        }
        self.image_data = Some(data);
        true
    }

    pub fn instruction_text(&self, language: &str) -> &str {
        self.instructions.get(language)
    }

    /// Ingredients paired with their measures. Measures are only trusted when
    /// there is exactly one per ingredient.
    pub fn ingredient_rows(&self) -> Vec<IngredientRow> {
        let aligned = self.measures.len() == self.ingredients.len();
        self.ingredients
            .iter()
            .enumerate()
            .map(|(index, ingredient)| IngredientRow {
                ingredient: ingredient.clone(),
                measure: if aligned {
                    self.measures[index].clone()
                } else {
                    MISSING_MEASURE.to_string()
                },
            })
            .collect()
    }

    /// "Tequila, Triple Sec, Lime Juice" style line for list rows.
    pub fn ingredients_summary(&self) -> String {
        self.ingredients.iter().map(|i| capitalize_words(i)).collect::<Vec<_>>().join(", ")
    }
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Deserialize)]
struct RawDrink {
    #[serde(rename = "idDrink")]
    id: String,
    #[serde(rename = "strDrink")]
    name: String,
    #[serde(rename = "strCategory")]
    category: String,
    #[serde(rename = "strAlcoholic")]
    alcoholic: String,
    #[serde(rename = "strGlass")]
    glass: String,
    #[serde(rename = "strDrinkThumb")]
    thumb: String,
    #[serde(rename = "strInstructions")]
    instructions: String,
    #[serde(rename = "strInstructionsES", default)]
    instructions_es: Option<String>,
    #[serde(rename = "strInstructionsDE", default)]
    instructions_de: Option<String>,
    #[serde(rename = "strInstructionsFR", default)]
    instructions_fr: Option<String>,
    #[serde(rename = "strInstructionsIT", default)]
    instructions_it: Option<String>,
    #[serde(rename = "strInstructionsZH-HANS", default)]
    instructions_zh_hans: Option<String>,
    #[serde(rename = "strInstructionsZH-HANT", default)]
    instructions_zh_hant: Option<String>,
    #[serde(rename = "strIngredient1", default)]
    ingredient1: Option<String>,
    #[serde(rename = "strIngredient2", default)]
    ingredient2: Option<String>,
    #[serde(rename = "strIngredient3", default)]
    ingredient3: Option<String>,
    #[serde(rename = "strIngredient4", default)]
    ingredient4: Option<String>,
    #[serde(rename = "strIngredient5", default)]
    ingredient5: Option<String>,
    #[serde(rename = "strMeasure1", default)]
    measure1: Option<String>,
    #[serde(rename = "strMeasure2", default)]
    measure2: Option<String>,
    #[serde(rename = "strMeasure3", default)]
    measure3: Option<String>,
    #[serde(rename = "strMeasure4", default)]
    measure4: Option<String>,
    #[serde(rename = "strMeasure5", default)]
    measure5: Option<String>,
}

impl From<RawDrink> for Drink {
    fn from(raw: RawDrink) -> Self {
        let mut instructions = Instructions::new(raw.instructions);
        instructions.insert_variant("es", raw.instructions_es);
        instructions.insert_variant("de", raw.instructions_de);
        instructions.insert_variant("fr", raw.instructions_fr);
        instructions.insert_variant("it", raw.instructions_it);
        instructions.insert_variant("zh-hans", raw.instructions_zh_hans);
        instructions.insert_variant("zh-hant", raw.instructions_zh_hant);

        let ingredients =
            [raw.ingredient1, raw.ingredient2, raw.ingredient3, raw.ingredient4, raw.ingredient5];
        let ingredients = ingredients.into_iter().filter_map(non_blank).collect();
        let measures = [raw.measure1, raw.measure2, raw.measure3, raw.measure4, raw.measure5]
            .into_iter()
            .filter_map(non_blank)
            .collect();

        Drink {
            id: raw.id,
            name: raw.name,
            category: raw.category,
            alcoholic: raw.alcoholic,
            glass: raw.glass,
            ingredients,
            measures,
            image_url: raw.thumb,
            instructions,
            image_data: None,
        }
    }
}
