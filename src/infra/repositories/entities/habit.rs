//! Habit database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Habit;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "habits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::mark::Entity")]
    Marks,
}

impl Related<super::mark::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Habit {
    fn from(model: Model) -> Self {
        Habit {
            id: model.id,
            name: model.name,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}
