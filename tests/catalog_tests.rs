use chromatix::catalog::{Catalog, CatalogError};
use chromatix::selection::ColorId;

const SAMPLE: &str = r##"{
  "colors": [
    {
      "id": "pastel-blue",
      "name": "Pastel Blue",
      "description": "Soft and calm.",
      "mood": "relaxing",
      "colors": ["#a1c4fd", "#c2e9fb"],
      "associations": ["serenity", "freshness"]
    },
    {
      "id": "sparse",
      "name": "Sparse"
    }
  ]
}"##;

#[test]
fn test_parse_catalog_json() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();
    assert_eq!(catalog.colors.len(), 2);

    let blue = catalog.find(&ColorId::from("pastel-blue")).unwrap();
    assert_eq!(blue.mood, "relaxing");
    assert_eq!(blue.associations, vec!["serenity", "freshness"]);
}

#[test]
fn test_missing_fields_default() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();
    let sparse = catalog.find(&ColorId::from("sparse")).unwrap();
    assert!(sparse.description.is_empty());
    assert!(sparse.colors.is_empty());
}

#[test]
fn test_find_accepts_element_ids() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();
    assert_eq!(
        catalog.name_of(&ColorId::from("product-pastel-blue")),
        Some("Pastel Blue")
    );
    assert_eq!(catalog.name_of(&ColorId::from("unknown")), None);
}

#[test]
fn test_invalid_json_is_parse_error() {
    let err = Catalog::from_json("{\"colors\": 3}").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("colors-data.json");
    std::fs::write(&path, SAMPLE).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.colors[0].id, "pastel-blue");
    assert!(Catalog::load_optional(&path).is_some());
}

#[test]
fn test_missing_file_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(Catalog::load(&path), Err(CatalogError::Io(_))));
    assert!(Catalog::load_optional(&path).is_none());
}

#[test]
fn test_builtin_catalog() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.colors.len(), 10);
    assert!(catalog.colors.iter().all(|c| c.colors.len() == 2));
    assert_eq!(
        catalog.name_of(&ColorId::from("ocean-breeze")),
        Some("Ocean Breeze")
    );
}
