use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_customers_and_vehicles::Migration),
            Box::new(m20240101_000002_create_parts_table::Migration),
            Box::new(m20240101_000003_create_work_orders_table::Migration),
            Box::new(m20240101_000004_create_work_order_line_tables::Migration),
            Box::new(m20240101_000005_create_estimates_table::Migration),
            Box::new(m20240101_000006_create_inspection_tables::Migration),
        ]
    }
}

mod m20240101_000001_create_customers_and_vehicles {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_customers_and_vehicles"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::Email).string().null())
                        .col(ColumnDef::new(Customers::Phone).string().null())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Vehicles::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Vehicles::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Vehicles::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Vehicles::Make).string().not_null())
                        .col(ColumnDef::new(Vehicles::Model).string().not_null())
                        .col(ColumnDef::new(Vehicles::Year).integer().null())
                        .col(ColumnDef::new(Vehicles::Plate).string().null())
                        .col(ColumnDef::new(Vehicles::Vin).string().null())
                        .col(
                            ColumnDef::new(Vehicles::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Vehicles::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Customers {
        Table,
        Id,
        Name,
        Email,
        Phone,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Vehicles {
        Table,
        Id,
        CustomerId,
        Make,
        Model,
        Year,
        Plate,
        Vin,
        CreatedAt,
    }
}

mod m20240101_000002_create_parts_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_parts_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Parts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Parts::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Parts::PartNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Parts::Name).string().not_null())
                        .col(ColumnDef::new(Parts::Category).string().not_null())
                        .col(ColumnDef::new(Parts::Subcategory).string().null())
                        .col(ColumnDef::new(Parts::Brand).string().null())
                        .col(ColumnDef::new(Parts::Description).string().null())
                        .col(ColumnDef::new(Parts::Compatibility).string().null())
                        .col(
                            ColumnDef::new(Parts::Price)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Parts::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Parts::MinQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Parts::VendorId).uuid().null())
                        .col(ColumnDef::new(Parts::Details).json().not_null())
                        .col(
                            ColumnDef::new(Parts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Parts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_parts_category")
                        .table(Parts::Table)
                        .col(Parts::Category)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Parts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Parts {
        Table,
        Id,
        PartNumber,
        Name,
        Category,
        Subcategory,
        Brand,
        Description,
        Compatibility,
        Price,
        Quantity,
        MinQuantity,
        VendorId,
        Details,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_work_orders_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_work_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WorkOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WorkOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::WorkOrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(WorkOrders::Status).string().not_null())
                        .col(ColumnDef::new(WorkOrders::JobType).string().not_null())
                        .col(ColumnDef::new(WorkOrders::Priority).string().not_null())
                        .col(ColumnDef::new(WorkOrders::Source).string().not_null())
                        .col(ColumnDef::new(WorkOrders::CustomerId).uuid().null())
                        .col(ColumnDef::new(WorkOrders::VehicleId).uuid().null())
                        .col(ColumnDef::new(WorkOrders::ServiceAdvisorId).uuid().null())
                        .col(ColumnDef::new(WorkOrders::TechnicianId).uuid().null())
                        .col(ColumnDef::new(WorkOrders::Description).string().null())
                        .col(ColumnDef::new(WorkOrders::OdometerKm).integer().null())
                        .col(ColumnDef::new(WorkOrders::EstimatedTotal).decimal().null())
                        .col(ColumnDef::new(WorkOrders::SubtotalLabor).decimal().null())
                        .col(ColumnDef::new(WorkOrders::SubtotalParts).decimal().null())
                        .col(ColumnDef::new(WorkOrders::TaxAmount).decimal().null())
                        .col(ColumnDef::new(WorkOrders::TotalAmount).decimal().null())
                        .col(
                            ColumnDef::new(WorkOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_work_orders_status")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WorkOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum WorkOrders {
        Table,
        Id,
        WorkOrderNumber,
        Status,
        JobType,
        Priority,
        Source,
        CustomerId,
        VehicleId,
        ServiceAdvisorId,
        TechnicianId,
        Description,
        OdometerKm,
        EstimatedTotal,
        SubtotalLabor,
        SubtotalParts,
        TaxAmount,
        TotalAmount,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_work_order_line_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_work_order_line_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Labor::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Labor::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Labor::WorkOrderId).uuid().not_null())
                        .col(ColumnDef::new(Labor::Description).string().not_null())
                        .col(ColumnDef::new(Labor::Hours).decimal().not_null())
                        .col(ColumnDef::new(Labor::HourlyRate).decimal().not_null())
                        .col(ColumnDef::new(Labor::TechnicianId).uuid().null())
                        .col(
                            ColumnDef::new(Labor::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PartLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PartLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PartLines::WorkOrderId).uuid().not_null())
                        .col(ColumnDef::new(PartLines::PartId).uuid().null())
                        .col(ColumnDef::new(PartLines::PartNumber).string().not_null())
                        .col(ColumnDef::new(PartLines::Name).string().not_null())
                        .col(ColumnDef::new(PartLines::Quantity).integer().not_null())
                        .col(ColumnDef::new(PartLines::UnitPrice).decimal().not_null())
                        .col(
                            ColumnDef::new(PartLines::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ServiceLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ServiceLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ServiceLines::WorkOrderId).uuid().not_null())
                        .col(ColumnDef::new(ServiceLines::Name).string().not_null())
                        .col(ColumnDef::new(ServiceLines::Price).decimal().not_null())
                        .col(
                            ColumnDef::new(ServiceLines::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Payments::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Payments::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Payments::WorkOrderId).uuid().not_null())
                        .col(ColumnDef::new(Payments::Amount).decimal().not_null())
                        .col(ColumnDef::new(Payments::Method).string().not_null())
                        .col(ColumnDef::new(Payments::Reference).string().null())
                        .col(
                            ColumnDef::new(Payments::ReceivedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Attachments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Attachments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Attachments::WorkOrderId).uuid().not_null())
                        .col(ColumnDef::new(Attachments::FileName).string().not_null())
                        .col(ColumnDef::new(Attachments::ContentType).string().not_null())
                        .col(ColumnDef::new(Attachments::Url).string().not_null())
                        .col(ColumnDef::new(Attachments::UploadedBy).uuid().null())
                        .col(
                            ColumnDef::new(Attachments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(QcChecks::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(QcChecks::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(QcChecks::WorkOrderId).uuid().not_null())
                        .col(ColumnDef::new(QcChecks::Name).string().not_null())
                        .col(ColumnDef::new(QcChecks::Passed).boolean().not_null())
                        .col(ColumnDef::new(QcChecks::CheckedBy).uuid().null())
                        .col(ColumnDef::new(QcChecks::Notes).string().null())
                        .col(
                            ColumnDef::new(QcChecks::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                Table::drop().table(QcChecks::Table).to_owned(),
                Table::drop().table(Attachments::Table).to_owned(),
                Table::drop().table(Payments::Table).to_owned(),
                Table::drop().table(ServiceLines::Table).to_owned(),
                Table::drop().table(PartLines::Table).to_owned(),
                Table::drop().table(Labor::Table).to_owned(),
            ] {
                manager.drop_table(table).await?;
            }
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Labor {
        #[sea_orm(iden = "work_order_labor")]
        Table,
        Id,
        WorkOrderId,
        Description,
        Hours,
        HourlyRate,
        TechnicianId,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum PartLines {
        #[sea_orm(iden = "work_order_parts")]
        Table,
        Id,
        WorkOrderId,
        PartId,
        PartNumber,
        Name,
        Quantity,
        UnitPrice,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum ServiceLines {
        #[sea_orm(iden = "work_order_services")]
        Table,
        Id,
        WorkOrderId,
        Name,
        Price,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Payments {
        #[sea_orm(iden = "work_order_payments")]
        Table,
        Id,
        WorkOrderId,
        Amount,
        Method,
        Reference,
        ReceivedAt,
    }

    #[derive(DeriveIden)]
    enum Attachments {
        #[sea_orm(iden = "work_order_attachments")]
        Table,
        Id,
        WorkOrderId,
        FileName,
        ContentType,
        Url,
        UploadedBy,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum QcChecks {
        #[sea_orm(iden = "work_order_qc_checks")]
        Table,
        Id,
        WorkOrderId,
        Name,
        Passed,
        CheckedBy,
        Notes,
        CreatedAt,
    }
}

mod m20240101_000005_create_estimates_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_estimates_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Estimates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Estimates::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Estimates::WorkOrderId).uuid().not_null())
                        .col(
                            ColumnDef::new(Estimates::EstimateNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Estimates::Version).integer().not_null())
                        .col(ColumnDef::new(Estimates::Status).string().not_null())
                        .col(ColumnDef::new(Estimates::SubtotalLabor).decimal().not_null())
                        .col(ColumnDef::new(Estimates::SubtotalParts).decimal().not_null())
                        .col(
                            ColumnDef::new(Estimates::SubtotalServices)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Estimates::TaxAmount).decimal().not_null())
                        .col(ColumnDef::new(Estimates::Total).decimal().not_null())
                        .col(
                            ColumnDef::new(Estimates::ApprovedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Estimates::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Estimates::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Estimates {
        Table,
        Id,
        WorkOrderId,
        EstimateNumber,
        Version,
        Status,
        SubtotalLabor,
        SubtotalParts,
        SubtotalServices,
        TaxAmount,
        Total,
        ApprovedAt,
        CreatedAt,
    }
}

mod m20240101_000006_create_inspection_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_inspection_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Templates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Templates::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Templates::Name).string().not_null())
                        .col(ColumnDef::new(Templates::Category).string().null())
                        .col(
                            ColumnDef::new(Templates::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Templates::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TemplateItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TemplateItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TemplateItems::TemplateId).uuid().not_null())
                        .col(ColumnDef::new(TemplateItems::Label).string().not_null())
                        .col(ColumnDef::new(TemplateItems::Position).integer().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Inspections::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Inspections::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Inspections::WorkOrderId).uuid().not_null())
                        .col(ColumnDef::new(Inspections::TemplateId).uuid().not_null())
                        .col(
                            ColumnDef::new(Inspections::TemplateName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Inspections::InspectorId).uuid().null())
                        .col(
                            ColumnDef::new(Inspections::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InspectionItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InspectionItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InspectionItems::InspectionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InspectionItems::Label).string().not_null())
                        .col(
                            ColumnDef::new(InspectionItems::Position)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InspectionItems::Status).string().not_null())
                        .col(ColumnDef::new(InspectionItems::Notes).string().null())
                        .col(
                            ColumnDef::new(InspectionItems::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                Table::drop().table(InspectionItems::Table).to_owned(),
                Table::drop().table(Inspections::Table).to_owned(),
                Table::drop().table(TemplateItems::Table).to_owned(),
                Table::drop().table(Templates::Table).to_owned(),
            ] {
                manager.drop_table(table).await?;
            }
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Templates {
        #[sea_orm(iden = "inspection_templates")]
        Table,
        Id,
        Name,
        Category,
        Active,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum TemplateItems {
        #[sea_orm(iden = "inspection_template_items")]
        Table,
        Id,
        TemplateId,
        Label,
        Position,
    }

    #[derive(DeriveIden)]
    enum Inspections {
        Table,
        Id,
        WorkOrderId,
        TemplateId,
        TemplateName,
        InspectorId,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum InspectionItems {
        Table,
        Id,
        InspectionId,
        Label,
        Position,
        Status,
        Notes,
        UpdatedAt,
    }
}
