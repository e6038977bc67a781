use crate::ast::*;

/// A database query
#[derive(Debug, Clone, PartialEq)]
pub enum Query<'a> {
    Select(Box<Select<'a>>),
    Insert(Box<Insert<'a>>),
    Update(Box<Update<'a>>),
    Delete(Box<Delete<'a>>),
    CreateTable(Box<CreateTable<'a>>),
    CreateDatabase(Box<CreateDatabase<'a>>),
}

impl Query<'_> {
    /// `true` for statements returning rows.
    pub fn is_select(&self) -> bool {
        matches!(self, Query::Select(_))
    }
}

macro_rules! query {
    ($($kind:ident),*) => (
        $(
            impl<'a> From<$kind<'a>> for Query<'a> {
                #[inline]
                fn from(q: $kind<'a>) -> Self {
                    Query::$kind(Box::new(q))
                }
            }
        )*
    );
}

query!(Select, Insert, Update, Delete, CreateTable, CreateDatabase);
