//! Built-in collection used when no catalog file is configured.

use atelier_core::{
    Category, CurrencyCode, Locale, LocalizedText, Price, Product, ProductId, Size,
};

const SHOE_SIZES: &[&str] = &["39", "40", "41", "42", "43", "44", "45"];
const APPAREL_SIZES: &[&str] = &["XS", "S", "M", "L", "XL"];

fn sizes(labels: &[&str]) -> Vec<Size> {
    labels
        .iter()
        .filter_map(|label| Size::parse(label).ok())
        .collect()
}

struct Seed {
    id: &'static str,
    name: &'static str,
    fr: &'static str,
    it: &'static str,
    description: &'static str,
    price: i64,
    category: Category,
    sizes: &'static [&'static str],
    in_stock: bool,
    is_new: bool,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        name: "Court Sneaker Blanc",
        fr: "Basket Court Blanc",
        it: "Sneaker Court Bianca",
        description: "Low-top sneaker in full-grain calfskin with a hand-stitched cupsole.",
        price: 450,
        category: Category::Sneakers,
        sizes: SHOE_SIZES,
        in_stock: true,
        is_new: true,
    },
    Seed {
        id: "2",
        name: "Runner Suede Taupe",
        fr: "Runner Daim Taupe",
        it: "Runner Camoscio Tortora",
        description: "Lightweight runner in brushed suede and technical mesh.",
        price: 520,
        category: Category::Sneakers,
        sizes: &["40", "41", "42", "43"],
        in_stock: true,
        is_new: false,
    },
    Seed {
        id: "3",
        name: "Chelsea Boot Noir",
        fr: "Bottine Chelsea Noire",
        it: "Stivaletto Chelsea Nero",
        description: "Goodyear-welted Chelsea boot with elastic side panels.",
        price: 890,
        category: Category::Boots,
        sizes: SHOE_SIZES,
        in_stock: true,
        is_new: true,
    },
    Seed {
        id: "4",
        name: "Penny Loafer Cognac",
        fr: "Mocassin Penny Cognac",
        it: "Mocassino Penny Cognac",
        description: "Hand-burnished penny loafer on a leather sole.",
        price: 690,
        category: Category::Loafers,
        sizes: &["40", "41", "42", "43", "44"],
        in_stock: true,
        is_new: false,
    },
    Seed {
        id: "5",
        name: "Horsebit Loafer Bordeaux",
        fr: "Mocassin à Mors Bordeaux",
        it: "Mocassino con Morsetto Bordeaux",
        description: "Polished horsebit loafer with a gilded hardware bar.",
        price: 790,
        category: Category::Loafers,
        sizes: &["39", "40", "41", "42"],
        in_stock: false,
        is_new: true,
    },
    Seed {
        id: "6",
        name: "Structured Tote Ivoire",
        fr: "Cabas Structuré Ivoire",
        it: "Tote Strutturata Avorio",
        description: "Structured tote in grained leather with a suede-lined interior.",
        price: 1_850,
        category: Category::Bags,
        sizes: &[],
        in_stock: true,
        is_new: false,
    },
    Seed {
        id: "7",
        name: "Mini Crossbody Noir",
        fr: "Mini Sac Bandoulière Noir",
        it: "Mini Tracolla Nera",
        description: "Compact crossbody bag with an adjustable chain strap.",
        price: 1_250,
        category: Category::Bags,
        sizes: &[],
        in_stock: true,
        is_new: true,
    },
    Seed {
        id: "8",
        name: "Silk Twill Scarf",
        fr: "Carré en Twill de Soie",
        it: "Foulard in Twill di Seta",
        description: "Hand-rolled 90 cm silk twill scarf.",
        price: 420,
        category: Category::Accessories,
        sizes: &[],
        in_stock: true,
        is_new: false,
    },
    Seed {
        id: "9",
        name: "Reversible Leather Belt",
        fr: "Ceinture Réversible en Cuir",
        it: "Cintura Reversibile in Pelle",
        description: "Reversible calfskin belt with a palladium buckle.",
        price: 450,
        category: Category::Accessories,
        sizes: &["80", "85", "90", "95", "100"],
        in_stock: true,
        is_new: false,
    },
    Seed {
        id: "10",
        name: "Cashmere Overshirt",
        fr: "Surchemise en Cachemire",
        it: "Sovracamicia in Cashmere",
        description: "Double-faced cashmere overshirt with horn buttons.",
        price: 1_390,
        category: Category::Apparel,
        sizes: APPAREL_SIZES,
        in_stock: true,
        is_new: true,
    },
];

/// The built-in products, in featured order.
pub(super) fn products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_owned(),
            localized_name: LocalizedText::english(seed.name)
                .with(Locale::Fr, seed.fr)
                .with(Locale::It, seed.it),
            description: LocalizedText::english(seed.description),
            price: Price::from_units(seed.price, CurrencyCode::EUR),
            images: vec![
                format!("/images/products/{}-1.webp", seed.id),
                format!("/images/products/{}-2.webp", seed.id),
            ],
            category: seed.category,
            sizes: sizes(seed.sizes),
            in_stock: seed.in_stock,
            is_new: seed.is_new,
        })
        .collect()
}
