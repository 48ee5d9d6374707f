use sea_query::{ColumnDef, Expr, Iden, Table, TableCreateStatement};

#[derive(Debug, Iden)]
pub enum Transfers {
    Table,
    Id,
    Type,
    From,
    To,
    Amount,
    CreatedAt,
    Time,
}

pub fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Transfers::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Transfers::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Transfers::Type).text())
        .col(ColumnDef::new(Transfers::From).text())
        .col(ColumnDef::new(Transfers::To).text())
        .col(ColumnDef::new(Transfers::Amount).double())
        .col(
            ColumnDef::new(Transfers::CreatedAt)
                .date_time()
                .default(Expr::current_timestamp()),
        )
        .col(ColumnDef::new(Transfers::Time).date_time())
        .to_owned()
}
