//! Seed data script - populates the database with realistic demo data
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates:
//! - 12 catalog parts across every category
//! - 4 customers with vehicles
//! - 2 inspection templates
//! - 8 work orders spread across the board

use chrono::{Duration, Utc};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use std::time::Duration as StdDuration;
use tracing::info;
use uuid::Uuid;

use autoshop_api::entities::{
    customer, part, vehicle, work_order, work_order_labor, work_order_service,
};
use autoshop_api::migrator::Migrator;
use autoshop_api::models::{
    JobType, PartDetails, WorkOrderPriority, WorkOrderSource, WorkOrderStatus,
};
use autoshop_api::services::inspections::CreateTemplateRequest;
use sea_orm_migration::MigratorTrait;

#[derive(Parser, Debug)]
#[command(name = "seed-data", about = "Populate the database with demo data")]
struct Args {
    /// Database URL; falls back to DATABASE_URL, then local sqlite.
    #[arg(long)]
    database_url: Option<String>,

    /// Run migrations before seeding.
    #[arg(long, default_value_t = true)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    info!("=== Autoshop API Seed Data ===");

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite://autoshop.db?mode=rwc".to_string());

    let mut options = ConnectOptions::new(database_url.clone());
    options
        .max_connections(5)
        .min_connections(1)
        .connect_timeout(StdDuration::from_secs(10))
        .acquire_timeout(StdDuration::from_secs(10));

    info!("Connecting to database: {}", database_url);
    let db = Database::connect(options).await?;

    if args.migrate {
        info!("Running migrations...");
        Migrator::up(&db, None).await?;
    }

    info!("Creating parts...");
    let parts = create_parts(&db).await?;
    info!("  Created {} parts", parts.len());

    info!("Creating customers and vehicles...");
    let customers = create_customers(&db).await?;
    info!("  Created {} customers", customers.len());

    info!("Creating inspection templates...");
    create_templates(&db).await?;
    info!("  Created 2 templates");

    info!("Creating work orders...");
    let order_count = create_work_orders(&db, &customers).await?;
    info!("  Created {} work orders", order_count);

    info!("=== Seed Data Complete ===");
    info!("Try these API calls:");
    info!("  curl http://localhost:8080/api/v1/parts");
    info!("  curl http://localhost:8080/api/v1/work-orders/board");
    info!("  curl http://localhost:8080/api/v1/inventory/low-stock");
    info!("Or explore interactively at: http://localhost:8080/swagger-ui");

    Ok(())
}

async fn create_parts(db: &sea_orm::DatabaseConnection) -> anyhow::Result<Vec<part::Model>> {
    let catalog: Vec<(&str, &str, rust_decimal::Decimal, i32, i32, PartDetails)> = vec![
        (
            "Engine Oil 5W-30 Synthetic 5L",
            "EO-5W30-5L",
            dec!(42.50),
            24,
            8,
            PartDetails::EngineAndFluids {
                viscosity: Some("5W-30".into()),
                volume_liters: Some(5.0),
                fluid_type: Some("synthetic".into()),
                oem_approval: Some("VW 504.00".into()),
            },
        ),
        (
            "Coolant G12 Concentrate 1.5L",
            "CL-G12-15",
            dec!(14.90),
            10,
            4,
            PartDetails::EngineAndFluids {
                viscosity: None,
                volume_liters: Some(1.5),
                fluid_type: Some("coolant".into()),
                oem_approval: None,
            },
        ),
        (
            "Oil Filter",
            "OF-2108",
            dec!(9.80),
            40,
            12,
            PartDetails::EngineAndFluids {
                viscosity: None,
                volume_liters: None,
                fluid_type: None,
                oem_approval: None,
            },
        ),
        (
            "Front Brake Pad Set Ceramic",
            "BP-F-CER",
            dec!(58.00),
            6,
            6,
            PartDetails::Brakes {
                position: Some("FRONT".into()),
                material: Some("ceramic".into()),
                includes_hardware: Some(true),
            },
        ),
        (
            "Rear Brake Disc Pair 280mm",
            "BD-R-280",
            dec!(94.00),
            0,
            2,
            PartDetails::Brakes {
                position: Some("REAR".into()),
                material: Some("cast iron".into()),
                includes_hardware: Some(false),
            },
        ),
        (
            "Touch-Up Paint Arctic White",
            "TP-LY9C",
            dec!(19.90),
            15,
            3,
            PartDetails::PaintAndBody {
                color_code: Some("LY9C".into()),
                finish: Some("gloss".into()),
                volume_liters: Some(0.05),
            },
        ),
        (
            "Clear Coat Aerosol 400ml",
            "CC-400",
            dec!(12.40),
            3,
            5,
            PartDetails::PaintAndBody {
                color_code: None,
                finish: Some("clear".into()),
                volume_liters: Some(0.4),
            },
        ),
        (
            "AGM Battery 70Ah",
            "BAT-AGM70",
            dec!(139.00),
            5,
            2,
            PartDetails::Electrical {
                voltage: Some("12V".into()),
                amperage: Some("70Ah".into()),
                connector_type: None,
            },
        ),
        (
            "H7 LED Headlight Bulb Pair",
            "HL-H7-LED",
            dec!(49.90),
            18,
            6,
            PartDetails::Electrical {
                voltage: Some("12V".into()),
                amperage: None,
                connector_type: Some("PX26d".into()),
            },
        ),
        (
            "Blade Fuse Assortment 120pc",
            "FU-120",
            dec!(8.90),
            30,
            10,
            PartDetails::Electrical {
                voltage: None,
                amperage: Some("5-30A".into()),
                connector_type: Some("ATO".into()),
            },
        ),
        (
            "All-Weather Floor Mats",
            "FM-AW-4",
            dec!(34.90),
            12,
            4,
            PartDetails::Accessories {
                placement: Some("front and rear".into()),
                color: Some("black".into()),
                universal_fit: Some(true),
            },
        ),
        (
            "Roof Rack Cross Bars",
            "RR-CB-2",
            dec!(89.00),
            2,
            2,
            PartDetails::Accessories {
                placement: Some("roof".into()),
                color: Some("silver".into()),
                universal_fit: Some(false),
            },
        ),
    ];

    let now = Utc::now();
    let mut created = Vec::with_capacity(catalog.len());
    for (name, number, price, quantity, min_quantity, details) in catalog {
        let model = part::ActiveModel {
            id: Set(Uuid::new_v4()),
            part_number: Set(number.to_string()),
            name: Set(name.to_string()),
            category: Set(details.category()),
            subcategory: Set(None),
            brand: Set(None),
            description: Set(None),
            compatibility: Set(None),
            price: Set(price),
            quantity: Set(quantity),
            min_quantity: Set(min_quantity),
            vendor_id: Set(None),
            details: Set(serde_json::to_value(&details)?),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;
        created.push(model);
    }
    Ok(created)
}

async fn create_customers(
    db: &sea_orm::DatabaseConnection,
) -> anyhow::Result<Vec<customer::Model>> {
    let people = [
        ("Maria Gonzalez", "maria.g@example.com", "Toyota", "Corolla", 2019),
        ("James Okafor", "j.okafor@example.com", "Volkswagen", "Golf", 2021),
        ("Lena Fischer", "lena.f@example.com", "Ford", "Focus", 2017),
        ("Ravi Patel", "ravi.p@example.com", "Honda", "Civic", 2022),
    ];

    let now = Utc::now();
    let mut created = Vec::new();
    for (name, email, make, model, year) in people {
        let cust = customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            email: Set(Some(email.to_string())),
            phone: Set(None),
            created_at: Set(now),
        }
        .insert(db)
        .await?;

        vehicle::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(cust.id),
            make: Set(make.to_string()),
            model: Set(model.to_string()),
            year: Set(Some(year)),
            plate: Set(None),
            vin: Set(None),
            created_at: Set(now),
        }
        .insert(db)
        .await?;

        created.push(cust);
    }
    Ok(created)
}

async fn create_templates(db: &sea_orm::DatabaseConnection) -> anyhow::Result<()> {
    let (sender, _rx) = autoshop_api::events::event_channel(16);
    let service = autoshop_api::services::InspectionService::new(
        std::sync::Arc::new(db.clone()),
        std::sync::Arc::new(sender),
    );

    service
        .create_template(CreateTemplateRequest {
            name: "Multi-Point Inspection".to_string(),
            category: Some("general".to_string()),
            items: vec![
                "Engine oil level and condition".to_string(),
                "Brake pads and discs".to_string(),
                "Tire tread depth".to_string(),
                "Battery charge and terminals".to_string(),
                "Exterior lights".to_string(),
                "Wiper blades and washer fluid".to_string(),
            ],
        })
        .await?;

    service
        .create_template(CreateTemplateRequest {
            name: "Pre-Purchase Check".to_string(),
            category: Some("sales".to_string()),
            items: vec![
                "Bodywork and paint condition".to_string(),
                "Suspension and steering".to_string(),
                "Diagnostic trouble codes".to_string(),
                "Road test".to_string(),
            ],
        })
        .await?;

    Ok(())
}

async fn create_work_orders(
    db: &sea_orm::DatabaseConnection,
    customers: &[customer::Model],
) -> anyhow::Result<usize> {
    let mut rng = rand::thread_rng();
    let statuses = [
        WorkOrderStatus::Received,
        WorkOrderStatus::Received,
        WorkOrderStatus::Estimate,
        WorkOrderStatus::Approval,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::WaitingForParts,
        WorkOrderStatus::Completed,
    ];
    let job_types = [
        JobType::Repair,
        JobType::Maintenance,
        JobType::Inspection,
        JobType::Diagnostic,
    ];
    let descriptions = [
        "Grinding noise when braking",
        "60,000 km service",
        "Check engine light on",
        "A/C blows warm air",
        "Oil change and tire rotation",
        "Pre-purchase inspection",
        "Battery drains overnight",
        "Annual safety inspection",
    ];

    let now = Utc::now();
    for (i, status) in statuses.iter().enumerate() {
        let customer = customers
            .choose(&mut rng)
            .ok_or_else(|| anyhow::anyhow!("no customers seeded"))?;
        let created_at = now - Duration::days(rng.gen_range(0..14));

        let order = work_order::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_number: Set(format!("WO-{}-{:04}", created_at.format("%Y%m%d"), i + 1)),
            status: Set(*status),
            job_type: Set(job_types[i % job_types.len()]),
            priority: Set(if i % 3 == 0 {
                WorkOrderPriority::High
            } else {
                WorkOrderPriority::Normal
            }),
            source: Set(if i % 2 == 0 {
                WorkOrderSource::WalkIn
            } else {
                WorkOrderSource::Appointment
            }),
            customer_id: Set(Some(customer.id)),
            vehicle_id: Set(None),
            service_advisor_id: Set(None),
            technician_id: Set(None),
            description: Set(Some(descriptions[i].to_string())),
            odometer_km: Set(Some(rng.gen_range(20_000..180_000))),
            estimated_total: Set(None),
            subtotal_labor: Set(None),
            subtotal_parts: Set(None),
            tax_amount: Set(None),
            total_amount: Set(None),
            created_at: Set(created_at),
            updated_at: Set(created_at),
        }
        .insert(db)
        .await?;

        // Orders past reception get some line items.
        if *status != WorkOrderStatus::Received {
            work_order_labor::ActiveModel {
                id: Set(Uuid::new_v4()),
                work_order_id: Set(order.id),
                description: Set("Diagnosis and repair".to_string()),
                hours: Set(dec!(1.5)),
                hourly_rate: Set(dec!(85.00)),
                technician_id: Set(None),
                created_at: Set(created_at),
            }
            .insert(db)
            .await?;

            work_order_service::ActiveModel {
                id: Set(Uuid::new_v4()),
                work_order_id: Set(order.id),
                name: Set("Shop supplies".to_string()),
                price: Set(dec!(12.00)),
                created_at: Set(created_at),
            }
            .insert(db)
            .await?;
        }
    }

    Ok(statuses.len())
}
