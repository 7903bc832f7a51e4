use std::{
    collections::{
        HashMap,
        HashSet,
    },
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use serde_json::json;

use crate::{
    api::{
        images::ImageProvider,
        NetworkProvider,
    },
    core::{
        ApiError,
        Drink,
    },
    filters::FilterKind,
};

pub(crate) const MARGARITA_JSON: &str = r#"{
    "idDrink": "11007",
    "strDrink": "Margarita",
    "strDrinkAlternate": null,
    "strTags": "IBA,ContemporaryClassic",
    "strCategory": "Ordinary Drink",
    "strIBA": "Contemporary Classics",
    "strAlcoholic": "Alcoholic",
    "strGlass": "Cocktail glass",
    "strInstructions": "Rub the rim of the glass with the lime slice to make the salt stick to it. Shake the other ingredients with ice, then carefully pour into the glass.",
    "strInstructionsES": null,
    "strInstructionsDE": "Reiben Sie den Rand des Glases mit der Limettenscheibe, damit das Salz daran haftet.",
    "strInstructionsFR": null,
    "strInstructionsIT": "Strofina il bordo del bicchiere con la fetta di lime per far aderire il sale.",
    "strInstructionsZH-HANS": null,
    "strInstructionsZH-HANT": null,
    "strDrinkThumb": "https://www.thecocktaildb.com/images/media/drink/5noda61589575158.jpg",
    "strIngredient1": "Tequila",
    "strIngredient2": "Triple sec",
    "strIngredient3": "Lime juice",
    "strIngredient4": "Salt",
    "strIngredient5": null,
    "strIngredient6": null,
    "strMeasure1": "1 1/2 oz",
    "strMeasure2": "1/2 oz",
    "strMeasure3": "1 oz",
    "strMeasure4": null,
    "strMeasure5": null,
    "strMeasure6": null,
    "dateModified": "2015-08-18 14:42:59"
}"#;

pub(crate) fn drink(
    id: &str,
    name: &str,
    category: &str,
    alcoholic: &str,
    glass: &str,
    ingredients: &[&str],
) -> Drink {
    let ingredient = |n: usize| ingredients.get(n).copied();
    serde_json::from_value(json!({
        "idDrink": id,
        "strDrink": name,
        "strCategory": category,
        "strAlcoholic": alcoholic,
        "strGlass": glass,
        "strInstructions": format!("Mix the {name}."),
        "strDrinkThumb": format!("https://img.example/{id}.jpg"),
        "strIngredient1": ingredient(0),
        "strIngredient2": ingredient(1),
        "strIngredient3": ingredient(2),
        "strIngredient4": ingredient(3),
        "strIngredient5": ingredient(4),
    }))
    .expect("fixture drink decodes")
}

pub(crate) fn margarita() -> Drink {
    serde_json::from_str(MARGARITA_JSON).expect("margarita decodes")
}

/// Scripted stand-in for the HTTP API.
///
/// Facets absent from `facets` fail. Letters absent from `pages` return an
/// empty page unless listed in `failing_letters` or `panicking_letters`,
/// which misbehave until [`FakeNetwork::heal`] is called.
#[derive(Default)]
pub(crate) struct FakeNetwork {
    pub facets: HashMap<FilterKind, Vec<String>>,
    pub pages: HashMap<char, Vec<Drink>>,
    pub fail_all_pages: bool,
    pub facet_delay: Option<Duration>,
    failing_letters: Mutex<HashSet<char>>,
    panicking_letters: Mutex<HashSet<char>>,
    requested: Mutex<Vec<char>>,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_facet(mut self, kind: FilterKind, values: &[&str]) -> Self {
        self.facets.insert(kind, values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_all_facets(self, values: [&[&str]; 4]) -> Self {
        self.with_facet(FilterKind::Alcoholic, values[0])
            .with_facet(FilterKind::Category, values[1])
            .with_facet(FilterKind::Glass, values[2])
            .with_facet(FilterKind::Ingredients, values[3])
    }

    pub fn with_page(mut self, letter: char, drinks: Vec<Drink>) -> Self {
        self.pages.insert(letter, drinks);
        self
    }

    pub fn failing_pages(mut self) -> Self {
        self.fail_all_pages = true;
        self
    }

    pub fn failing_letter(self, letter: char) -> Self {
        self.failing_letters.lock().unwrap().insert(letter);
        self
    }

    pub fn panicking_letter(self, letter: char) -> Self {
        self.panicking_letters.lock().unwrap().insert(letter);
        self
    }

    pub fn slow_facets(mut self, delay: Duration) -> Self {
        self.facet_delay = Some(delay);
        self
    }

    pub fn heal(&self) {
        self.failing_letters.lock().unwrap().clear();
        self.panicking_letters.lock().unwrap().clear();
    }

    pub fn requested_letters(&self) -> Vec<char> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl NetworkProvider for FakeNetwork {
    async fn facet_values(&self, kind: FilterKind) -> Result<Vec<String>, ApiError> {
        if let Some(delay) = self.facet_delay {
            tokio::time::sleep(delay).await;
        }
        self.facets.get(&kind).cloned().ok_or(ApiError::DecodingError)
    }

    async fn drinks_starting_with(&self, letter: char) -> Result<Vec<Drink>, ApiError> {
        self.requested.lock().unwrap().push(letter);
        let panics = self.panicking_letters.lock().unwrap().contains(&letter);
        if panics {
            panic!("page {letter} blew up");
        }
        if self.fail_all_pages || self.failing_letters.lock().unwrap().contains(&letter) {
            return Err(ApiError::InvalidData);
        }
        Ok(self.pages.get(&letter).cloned().unwrap_or_default())
    }
}

/// Image source that counts downloads and can be told to fail.
#[derive(Default)]
pub(crate) struct FakeImages {
    pub fail: bool,
    downloads: Mutex<Vec<String>>,
}

impl FakeImages {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageProvider for FakeImages {
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.downloads.lock().unwrap().push(url.to_string());
        tokio::task::yield_now().await;
        if self.fail {
            return Err(ApiError::InvalidData);
        }
        Ok(url.as_bytes().to_vec())
    }
}
