use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Solutions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Solutions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Solutions::Uuid).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Solutions::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Solutions::Description).string())
                    .col(
                        ColumnDef::new(Solutions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Solutions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Parameters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Parameters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Parameters::Uuid).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Parameters::Name).string())
                    .col(ColumnDef::new(Parameters::Key).string().not_null().unique_key())
                    .col(ColumnDef::new(Parameters::Value).text())
                    .col(ColumnDef::new(Parameters::Description).string())
                    .col(
                        ColumnDef::new(Parameters::IsSecret)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Parameters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Parameters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Uuid).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Tags::Name).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Tags::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SolutionParameters::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SolutionParameters::SolutionId).integer().not_null())
                    .col(ColumnDef::new(SolutionParameters::ParameterId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(SolutionParameters::SolutionId)
                            .col(SolutionParameters::ParameterId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sp_solution")
                            .from(SolutionParameters::Table, SolutionParameters::SolutionId)
                            .to(Solutions::Table, Solutions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sp_parameter")
                            .from(SolutionParameters::Table, SolutionParameters::ParameterId)
                            .to(Parameters::Table, Parameters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ParameterTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ParameterTags::ParameterId).integer().not_null())
                    .col(ColumnDef::new(ParameterTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ParameterTags::ParameterId)
                            .col(ParameterTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pt_parameter")
                            .from(ParameterTags::Table, ParameterTags::ParameterId)
                            .to(Parameters::Table, Parameters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pt_tag")
                            .from(ParameterTags::Table, ParameterTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SolutionApiKeys::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SolutionApiKeys::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SolutionApiKeys::Uuid).uuid().not_null().unique_key())
                    .col(ColumnDef::new(SolutionApiKeys::SolutionId).integer().not_null())
                    .col(ColumnDef::new(SolutionApiKeys::KeyName).string().not_null())
                    .col(
                        ColumnDef::new(SolutionApiKeys::KeyHash)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SolutionApiKeys::KeyPrefix).string().not_null())
                    .col(
                        ColumnDef::new(SolutionApiKeys::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SolutionApiKeys::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(SolutionApiKeys::LastUsed).timestamp_with_time_zone())
                    .col(ColumnDef::new(SolutionApiKeys::ExpiresAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sak_solution")
                            .from(SolutionApiKeys::Table, SolutionApiKeys::SolutionId)
                            .to(Solutions::Table, Solutions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sp_parameter_id")
                    .table(SolutionParameters::Table)
                    .col(SolutionParameters::ParameterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sak_solution_id")
                    .table(SolutionApiKeys::Table)
                    .col(SolutionApiKeys::SolutionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SolutionApiKeys::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ParameterTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SolutionParameters::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Tags::Table).to_owned()).await?;
        manager
            .drop_table(Table::drop().table(Parameters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Solutions::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Solutions {
    Table,
    Id,
    Uuid,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Parameters {
    Table,
    Id,
    Uuid,
    Name,
    Key,
    Value,
    Description,
    IsSecret,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Uuid,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SolutionParameters {
    Table,
    SolutionId,
    ParameterId,
}

#[derive(DeriveIden)]
enum ParameterTags {
    Table,
    ParameterId,
    TagId,
}

#[derive(DeriveIden)]
enum SolutionApiKeys {
    Table,
    Id,
    Uuid,
    SolutionId,
    KeyName,
    KeyHash,
    KeyPrefix,
    IsActive,
    CreatedAt,
    LastUsed,
    ExpiresAt,
}
