//! Keyword dictionary
//!
//! Static mapping from canonical budget/category keys (Spanish and English) to
//! the words and phrases that identify them. Entries are kept in declaration
//! order, which is also the order the matcher scans them in.

/// One dictionary entry: a canonical key and its matching words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordGroup {
    pub key: &'static str,
    pub keywords: &'static [&'static str],
}

impl KeywordGroup {
    /// The key followed by its keywords
    pub fn terms(&self) -> impl Iterator<Item = &'static str> {
        let keywords = self.keywords;
        std::iter::once(self.key).chain(keywords.iter().copied())
    }

    /// Whether `category` and some term of this group contain one another
    pub fn relates_to(&self, category: &str) -> bool {
        let category = category.trim().to_lowercase();
        !category.is_empty()
            && self
                .terms()
                .any(|term| term.contains(category.as_str()) || category.contains(term))
    }
}

const FOOD: &[&str] = &[
    "food",
    "comida",
    "alimentacion",
    "alimentación",
    "groceries",
    "grocery",
    "supermercado",
    "mercado",
    "restaurant",
    "restaurante",
    "dining",
    "dinner",
    "cena",
    "lunch",
    "almuerzo",
    "desayuno",
    "breakfast",
    "cafe",
    "café",
    "coffee",
    "pizza",
    "burger",
    "hamburguesa",
    "sushi",
    "delivery",
    "panaderia",
    "bakery",
    "snack",
];

const TRANSPORT: &[&str] = &[
    "transport",
    "transporte",
    "uber",
    "taxi",
    "metro",
    "subway",
    "gasolina",
    "fuel",
    "combustible",
    "parking",
    "estacionamiento",
    "peaje",
    "toll",
    "train",
    "tren",
    "flight",
    "vuelo",
    "autobus",
    "camion",
];

const ENTERTAINMENT: &[&str] = &[
    "entertainment",
    "entretenimiento",
    "cinema",
    "movie",
    "pelicula",
    "película",
    "netflix",
    "spotify",
    "concert",
    "concierto",
    "streaming",
    "teatro",
    "theater",
    "videojuego",
    "ocio",
];

const HEALTH: &[&str] = &[
    "health",
    "salud",
    "doctor",
    "medico",
    "médico",
    "farmacia",
    "pharmacy",
    "hospital",
    "medicina",
    "medicine",
    "dentista",
    "dentist",
    "gym",
    "gimnasio",
];

const HOUSING: &[&str] = &[
    "housing", "vivienda", "hogar", "rent", "renta", "alquiler", "mortgage", "hipoteca",
];

const UTILITIES: &[&str] = &[
    "utilities",
    "servicios",
    "electricity",
    "electricidad",
    "water",
    "agua",
    "internet",
    "phone",
    "telefono",
    "teléfono",
    "celular",
    "luz",
];

const SHOPPING: &[&str] = &[
    "shopping", "compras", "ropa", "clothes", "clothing", "amazon", "tienda", "store",
];

const EDUCATION: &[&str] = &[
    "education",
    "educacion",
    "educación",
    "school",
    "escuela",
    "colegio",
    "universidad",
    "university",
    "course",
    "curso",
    "tuition",
    "colegiatura",
    "libros",
    "books",
];

const BUILTIN_GROUPS: &[KeywordGroup] = &[
    KeywordGroup { key: "comida", keywords: FOOD },
    KeywordGroup { key: "food", keywords: FOOD },
    KeywordGroup { key: "alimentacion", keywords: FOOD },
    KeywordGroup { key: "transporte", keywords: TRANSPORT },
    KeywordGroup { key: "transport", keywords: TRANSPORT },
    KeywordGroup { key: "entretenimiento", keywords: ENTERTAINMENT },
    KeywordGroup { key: "entertainment", keywords: ENTERTAINMENT },
    KeywordGroup { key: "salud", keywords: HEALTH },
    KeywordGroup { key: "health", keywords: HEALTH },
    KeywordGroup { key: "vivienda", keywords: HOUSING },
    KeywordGroup { key: "housing", keywords: HOUSING },
    KeywordGroup { key: "servicios", keywords: UTILITIES },
    KeywordGroup { key: "utilities", keywords: UTILITIES },
    KeywordGroup { key: "compras", keywords: SHOPPING },
    KeywordGroup { key: "shopping", keywords: SHOPPING },
    KeywordGroup { key: "educacion", keywords: EDUCATION },
    KeywordGroup { key: "education", keywords: EDUCATION },
];

/// Ordered, immutable keyword dictionary
#[derive(Debug, Clone, Copy)]
pub struct KeywordDictionary {
    groups: &'static [KeywordGroup],
}

impl KeywordDictionary {
    /// The built-in multilingual dictionary
    pub const fn builtin() -> Self {
        Self {
            groups: BUILTIN_GROUPS,
        }
    }

    /// All groups, in declaration order
    pub fn groups(&self) -> &'static [KeywordGroup] {
        self.groups
    }

    /// Keywords for a key, looked up case-insensitively; empty when unknown
    pub fn keywords_for(&self, key: &str) -> &'static [&'static str] {
        let key = key.trim().to_lowercase();
        self.groups
            .iter()
            .find(|group| group.key == key)
            .map(|group| group.keywords)
            .unwrap_or(&[])
    }
}

impl Default for KeywordDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
