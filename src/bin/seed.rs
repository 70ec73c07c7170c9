use sea_orm::{ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait, Set, sea_query::OnConflict};
use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::products::{ActiveModel, Column, Entity as Products, Thumbnails},
};
use uuid::Uuid;

struct SeedProduct {
    title: &'static str,
    description: &'static str,
    code: &'static str,
    price: f64,
    stock: i32,
    category: &'static str,
    status: bool,
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        title: "Ferris Mug",
        description: "Coffee tastes better with Ferris",
        code: "MUG-001",
        price: 12.0,
        stock: 100,
        category: "kitchen",
        status: true,
    },
    SeedProduct {
        title: "Cast Iron Pan",
        description: "Heavy, seasoned and nearly indestructible",
        code: "PAN-001",
        price: 39.9,
        stock: 25,
        category: "kitchen",
        status: true,
    },
    SeedProduct {
        title: "Desk Lamp",
        description: "Warm light with an adjustable arm",
        code: "LAMP-001",
        price: 24.5,
        stock: 40,
        category: "home",
        status: true,
    },
    SeedProduct {
        title: "Wool Blanket",
        description: "Back in stock next season",
        code: "BLANKET-001",
        price: 59.0,
        stock: 0,
        category: "home",
        status: false,
    },
    SeedProduct {
        title: "Sticker Pack",
        description: "Decorate your laptop",
        code: "STICKER-001",
        price: 4.0,
        stock: 500,
        category: "stationery",
        status: true,
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let inserted = seed_products(&orm).await?;
    println!("Seed completed. {inserted} new product(s)");
    Ok(())
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<usize> {
    let mut inserted = 0;
    for seed in PRODUCTS {
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(seed.title.to_string()),
            description: Set(seed.description.to_string()),
            code: Set(seed.code.to_string()),
            price: Set(seed.price),
            stock: Set(seed.stock),
            category: Set(seed.category.to_string()),
            status: Set(seed.status),
            thumbnails: Set(Thumbnails::default()),
            created_at: NotSet,
        };

        let result = Products::insert(active)
            .on_conflict(OnConflict::column(Column::Code).do_nothing().to_owned())
            .exec(orm)
            .await;

        match result {
            Ok(_) => {
                inserted += 1;
                println!("Seeded product {}", seed.code);
            }
            // Existing code: leave the stored product untouched.
            Err(DbErr::RecordNotInserted) => println!("Skipped existing product {}", seed.code),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(inserted)
}
