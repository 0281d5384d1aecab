use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub vin: String,
    pub model_id: String,
    pub color: String,
    pub trim_description: Option<String>,
    pub year: i32,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::car_models::Entity",
        from = "Column::ModelId",
        to = "super::car_models::Column::Id"
    )]
    CarModels,
    #[sea_orm(has_many = "super::car_options::Entity")]
    CarOptions,
    #[sea_orm(has_many = "super::sales::Entity")]
    Sales,
    #[sea_orm(has_many = "super::test_drives::Entity")]
    TestDrives,
}

impl Related<super::car_models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarModels.def()
    }
}

impl Related<super::car_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarOptions.def()
    }
}

impl Related<super::options::Entity> for Entity {
    fn to() -> RelationDef {
        super::car_options::Relation::Options.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::car_options::Relation::Cars.def().rev())
    }
}

impl Related<super::sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl Related<super::test_drives::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestDrives.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
