//! Mark database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Mark;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "marks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub habit_id: i32,
    /// Calendar day in `YYYY-MM-DD` form, unique per habit
    pub date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::habit::Entity",
        from = "Column::HabitId",
        to = "super::habit::Column::Id",
        on_delete = "Cascade"
    )]
    Habit,
}

impl Related<super::habit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Habit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Mark {
    fn from(model: Model) -> Self {
        Mark {
            id: model.id,
            habit_id: model.habit_id,
            date: model.date,
        }
    }
}
