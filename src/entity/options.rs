use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "options")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::car_options::Entity")]
    CarOptions,
}

impl Related<super::car_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarOptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
