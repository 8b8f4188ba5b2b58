#![allow(missing_docs)]
#![allow(dead_code)]

use jsonbind::{
    BindContext, BindError, Bindable, FieldValue, FieldWriteable, JsonWriter, Map, SelfWriteable,
    TypeDescriptor, Value, WriteError,
};

pub const CATALOG: &str = r#"
{
    "metadata": {"total": 2, "offset": 0},
    "retailers": [
        {"id": "r7", "name": "Corner Shop"},
        {"id": "r9"}
    ],
    "products": [
        {
            "id": "p-1",
            "name": "Linen Shirt",
            "price": 49.5,
            "inStock": true,
            "categories": [{"id": "shirts", "name": "Shirts"}],
            "sizes": ["S", "M"]
        },
        {
            "id": "p-2",
            "name": "Wool Socks – 3 pack",
            "price": 12.0,
            "inStock": false,
            "categories": [],
            "sizes": []
        }
    ]
}
"#;

/// Read by hand from the generic tree; incomplete records are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Retailer {
    pub id: String,
    pub name: String,
}

impl Retailer {
    pub fn from_json(map: &Map) -> Option<Self> {
        Some(Self {
            id: map.get("id")?.as_str()?.to_owned(),
            name: map.get("name")?.as_str()?.to_owned(),
        })
    }
}

impl SelfWriteable for Retailer {
    fn to_json(&self, w: &mut JsonWriter) -> Result<(), WriteError> {
        w.add_item(Some("id"), &self.id)?;
        w.add_item(Some("name"), &self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Bindable for Category {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::constructed("Category", |ctx: &mut BindContext<'_>| {
            Ok(Category {
                id: ctx.get_value("id")?,
                name: ctx.get_value("name")?,
            })
        })
        .field::<String>("id")
        .field::<String>("name")
        .getter("id", |c| FieldValue::from(&c.id))
        .getter("name", |c| FieldValue::from(&c.name))
    }
}

impl FieldWriteable for Category {
    fn field_names(&self) -> &[&'static str] {
        &["id", "name"]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub in_stock: bool,
    pub categories: Vec<Category>,
    pub sizes: Vec<String>,
}

impl Bindable for Product {
    fn describe() -> TypeDescriptor<Self> {
        TypeDescriptor::setter_bound("Product", Self::default)
            .setter("id", |p, v: String| p.id = v)
            .setter("name", |p, v: String| p.name = v)
            .setter("price", |p, v: f64| p.price = v)
            .setter("inStock", |p, v: bool| p.in_stock = v)
            .setter("categories", |p, v: Vec<Category>| p.categories = v)
            .setter("sizes", |p, v: Vec<String>| p.sizes = v)
            .getter("id", |p| FieldValue::from(&p.id))
            .getter("name", |p| FieldValue::from(&p.name))
            .getter("price", |p| FieldValue::from(p.price))
            .getter("inStock", |p| FieldValue::from(p.in_stock))
            .getter("categories", |p| {
                FieldValue::seq(p.categories.iter().map(FieldValue::fields))
            })
            .getter("sizes", |p| FieldValue::from(&p.sizes))
    }
}

impl FieldWriteable for Product {
    fn field_names(&self) -> &[&'static str] {
        &["id", "name", "price", "inStock", "categories", "sizes"]
    }
}

/// The whole response, read with a mix of typed binding and hand-written
/// readers.
#[derive(Debug)]
pub struct Catalog {
    pub total: i64,
    pub retailers: Vec<Retailer>,
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn from_value(value: &Value) -> Result<Self, BindError> {
        let retailers: Vec<Retailer> = value
            .get("retailers")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
            .filter_map(Retailer::from_json)
            .collect();
        let products: Vec<Product> = value
            .get("products")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(jsonbind::binder::bind)
            .collect::<Result<_, _>>()?;
        let total = value
            .get("metadata")
            .and_then(|m| m.get("total"))
            .and_then(Value::as_i64)
            .unwrap_or_default();
        Ok(Self {
            total,
            retailers,
            products,
        })
    }
}

impl SelfWriteable for Catalog {
    fn to_json(&self, w: &mut JsonWriter) -> Result<(), WriteError> {
        w.start_object(Some("metadata"));
        w.add_item(Some("total"), self.total)?;
        w.end_object();
        w.start_array(Some("retailers"));
        for retailer in &self.retailers {
            w.add_object(None, retailer)?;
        }
        w.end_array();
        w.start_array(Some("products"));
        for product in &self.products {
            w.add_fields_of(None, product)?;
        }
        w.end_array();
        Ok(())
    }
}
