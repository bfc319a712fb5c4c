use std::sync::LazyLock;

use pretty_assertions::assert_eq;
use refset_registry::{
	Attributes, RecordId, Registered, Registry, RegistryError, StaticRecord, Value,
};

#[derive(Debug, StaticRecord)]
#[record(registry = COLORS)]
struct Color {
	id: RecordId,
	hex: String,
}

static COLORS: LazyLock<Registry<Color>> = LazyLock::new(|| {
	Registry::<Color>::builder("Color")
		.record_with("red", |c| c.hex = "#ff0000".into())
		.record_with("blue", |c| c.hex = "#0000ff".into())
		.build_or_panic()
});

#[derive(Debug, StaticRecord)]
#[record(registry = CATEGORIES)]
struct Category {
	id: RecordId,
	#[record(readonly)]
	title: &'static str,
	position: u32,
}

static CATEGORIES: LazyLock<Registry<Category>> = LazyLock::new(|| {
	Registry::<Category>::builder("Category")
		.record_with("books", |c| {
			c.title = "Books";
			c.position = 2;
		})
		.record_with("music", |c| {
			c.title = "Music";
			c.position = 1;
		})
		.build_or_panic()
});

#[derive(Debug, StaticRecord)]
#[record(registry = PRODUCTS)]
#[belongs_to_static(category)]
#[belongs_to_static(
	fallback,
	class_name = Category,
	foreign_key = "backup_category",
	registry = CATEGORIES
)]
struct Product {
	#[record(id)]
	sku: RecordId,
	#[record(readonly)]
	name: &'static str,
	category_id: Option<RecordId>,
	backup_category: Option<RecordId>,
	#[record(skip)]
	notes: Vec<String>,
}

static PRODUCTS: LazyLock<Registry<Product>> = LazyLock::new(|| {
	Registry::<Product>::builder("Product")
		.try_record_with("novel", |p| {
			p.name = "Novel";
			p.notes.push("paperback".into());
			p.set_category(Category::find_by_id("books"))
		})
		.try_record_with("vinyl", |p| {
			p.name = "Vinyl";
			p.set_category(Category::find_by_id("music"))?;
			p.set_fallback(Category::find_by_id("books"))
		})
		.record_with("gift_card", |p| p.name = "Gift card")
		.build_or_panic()
});

/// An owner that is never registered anywhere.
#[derive(Debug, StaticRecord)]
#[belongs_to_static(color)]
struct Swatch {
	id: RecordId,
	color_id: Option<RecordId>,
}

#[derive(Debug, StaticRecord)]
#[record(registry = TIERS)]
struct Tier {
	id: RecordId,
}

static TIERS: LazyLock<Registry<Tier>> = LazyLock::new(|| {
	Registry::<Tier>::builder("Tier")
		.record(7u32)
		.record(9u32)
		.build_or_panic()
});

/// Owner whose foreign key is numeric rather than a `RecordId`.
#[derive(Debug, StaticRecord)]
#[belongs_to_static(tier)]
struct Task {
	id: RecordId,
	tier_id: Option<u32>,
}

fn ids<R: StaticRecord>(records: &[&R]) -> Vec<String> {
	records.iter().map(|r| r.id().to_string()).collect()
}

#[test]
fn color_scenario() {
	assert_eq!(ids(&Color::all()), ["red", "blue"]);
	assert_eq!(
		Color::find("green").unwrap_err(),
		RegistryError::RecordNotFound {
			registry: "Color",
			id: "green".into(),
		}
	);
	assert_eq!(ids(&Color::where_ids(["red", "green"])), ["red"]);
	assert_eq!(Color::find("blue").unwrap().hex, "#0000ff");
}

#[test]
fn registered_forwards_to_registry() {
	assert!(std::ptr::eq(Color::registry(), &*COLORS));
	assert!(std::ptr::eq(
		Color::find_by_id("red").unwrap(),
		COLORS.find("red").unwrap()
	));
	assert!(Color::find_by_id("green").is_none());
}

#[test]
fn derived_attribute_list() {
	assert_eq!(Color::ATTRIBUTES, ["id", "hex"]);
	assert_eq!(Category::ATTRIBUTES, ["id", "title", "position"]);
	assert_eq!(
		Product::ATTRIBUTES,
		["sku", "name", "category_id", "backup_category"]
	);
	assert_eq!(Product::TYPE_NAME, "Product");
}

#[test]
fn pluck_derived_attributes() {
	assert_eq!(
		Category::pluck("position").unwrap(),
		vec![Value::Int(2), Value::Int(1)]
	);
	assert_eq!(
		Category::pluck("title").unwrap(),
		vec![Value::from("Books"), Value::from("Music")]
	);
	assert_eq!(
		Product::pluck("category_id").unwrap(),
		vec![Value::from("books"), Value::from("music"), Value::Null]
	);
	assert_eq!(
		Category::pluck("colour").unwrap_err(),
		RegistryError::UnknownAttribute {
			owner: "Category",
			attribute: "colour".into(),
		}
	);
	assert!(matches!(
		Product::pluck("notes"),
		Err(RegistryError::UnknownAttribute { .. })
	));
}

#[test]
fn pluck_names_foreign_keys_not_associations() {
	assert_eq!(
		Product::pluck("category").unwrap_err(),
		RegistryError::UnknownAttribute {
			owner: "Product",
			attribute: "category".into(),
		}
	);
	assert_eq!(
		Product::pluck("backup_category").unwrap(),
		vec![Value::Null, Value::from("books"), Value::Null]
	);
}

#[test]
fn derived_writes_respect_access() {
	let mut category = Category::new(RecordId::from("films"));

	category.write_attribute("position", Value::Int(5)).unwrap();
	assert_eq!(category.position, 5);

	assert_eq!(
		category.write_attribute("id", Value::from("other")).unwrap_err(),
		RegistryError::ReadOnlyAttribute {
			attribute: "id".into(),
		}
	);
	assert!(matches!(
		category.write_attribute("title", Value::from("Films")),
		Err(RegistryError::ReadOnlyAttribute { .. })
	));
	assert_eq!(
		category.write_attribute("position", Value::from("first")).unwrap_err(),
		RegistryError::AttributeType {
			attribute: "position".into(),
			expected: "u32",
			found: "string",
		}
	);
	assert!(matches!(
		category.write_attribute("colour", Value::Null),
		Err(RegistryError::UnknownAttribute { owner: "Category", .. })
	));
	assert_eq!(category.id().as_str(), "films");
}

#[test]
fn custom_id_field() {
	let novel = Product::find("novel").unwrap();
	assert_eq!(novel.sku.as_str(), "novel");
	assert_eq!(novel.read_attribute("sku"), Some(Value::from("novel")));
	assert_eq!(novel.read_attribute("id"), None);
	assert_eq!(novel.notes, ["paperback"]);
}

#[test]
fn associations_set_during_registration() {
	let novel = Product::find("novel").unwrap();
	let vinyl = Product::find("vinyl").unwrap();
	let gift = Product::find("gift_card").unwrap();

	assert_eq!(novel.category().map(|c| c.title), Some("Books"));
	assert_eq!(vinyl.category().map(|c| c.title), Some("Music"));
	assert_eq!(vinyl.fallback().map(|c| c.title), Some("Books"));
	assert!(novel.fallback().is_none());
	assert!(gift.category().is_none());
}

#[test]
fn association_descriptors() {
	let category = Product::category_association();
	assert_eq!(category.name(), "category");
	assert_eq!(category.class_name(), "Category");
	assert_eq!(category.foreign_key(), "category_id");
	assert!(std::ptr::eq(category.target(), &*CATEGORIES));

	let fallback = Product::fallback_association();
	assert_eq!(fallback.class_name(), "Category");
	assert_eq!(fallback.foreign_key(), "backup_category");
	assert!(fallback.check_owner::<Product>().is_ok());
}

#[test]
fn association_round_trip() {
	let red = Color::find("red").unwrap();
	let mut swatch = Swatch::new(RecordId::from("s1"));
	assert!(swatch.color().is_none());

	swatch.set_color(Some(red)).unwrap();
	assert_eq!(swatch.color_id, Some(RecordId::from("red")));
	assert!(std::ptr::eq(swatch.color().unwrap(), red));

	swatch.set_color(None).unwrap();
	assert!(swatch.color().is_none());

	swatch.color_id = Some(RecordId::from("green"));
	assert!(swatch.color().is_none());
}

#[test]
fn association_accepts_integer_like_foreign_ids() {
	let mut swatch = Swatch::new(RecordId::from("s2"));
	swatch
		.write_attribute("color_id", Value::from("blue"))
		.unwrap();
	assert_eq!(swatch.color().map(|c| c.hex.as_str()), Some("#0000ff"));

	swatch.write_attribute("color_id", Value::Int(7)).unwrap();
	assert_eq!(swatch.color_id, Some(RecordId::from(7u8)));
	assert!(swatch.color().is_none());
}

#[test]
fn numeric_foreign_key_round_trip() {
	let mut task = Task::new(RecordId::from("t1"));

	task.tier_id = Some(7);
	assert_eq!(task.tier().map(|t| t.id.as_str()), Some("7"));

	let nine = Tier::find(9).unwrap();
	task.set_tier(Some(nine)).unwrap();
	assert_eq!(task.tier_id, Some(9));
	assert!(std::ptr::eq(task.tier().unwrap(), nine));

	task.set_tier(None).unwrap();
	assert_eq!(task.tier_id, None);
	assert!(task.tier().is_none());
}

#[test]
fn dangling_reads_return_none() {
	let _ = tracing_subscriber::fmt()
		.with_max_level(tracing::Level::DEBUG)
		.with_test_writer()
		.try_init();

	let swatch = Swatch {
		id: RecordId::from("s3"),
		color_id: Some(RecordId::from("magenta")),
	};
	assert!(swatch.color().is_none());
}

#[test]
fn registry_serializes_records_in_order() {
	#[derive(serde::Serialize, StaticRecord)]
	struct Level {
		id: RecordId,
		rank: u8,
	}

	let levels = Registry::<Level>::builder("Level")
		.record_with("low", |l| l.rank = 1)
		.record_with("high", |l| l.rank = 9)
		.build()
		.unwrap();

	assert_eq!(
		serde_json::to_value(&levels).unwrap(),
		serde_json::json!([
			{ "id": "low", "rank": 1 },
			{ "id": "high", "rank": 9 },
		])
	);
}
