use crate::model::transfer::Transfer;
use crate::schema::transfer::Transfers as TransferSchema;
use crate::utils::AppError;
use crate::{
    abstract_trait::TransferRepositoryTrait,
    config::ConnectionPool,
    domain::request::transfer::{
        CreateTransferRequest, FindAllTransferRequest, UpdateTransferRequest,
    },
};
use async_trait::async_trait;
use sea_query::{Expr, Func, LikeExpr, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_binder::SqlxBinder;
use tracing::{debug, error, info};

const TRANSFER_COLUMNS: [TransferSchema; 6] = [
    TransferSchema::Id,
    TransferSchema::Type,
    TransferSchema::From,
    TransferSchema::To,
    TransferSchema::Amount,
    TransferSchema::Time,
];

pub struct TransferRepository {
    db_pool: ConnectionPool,
}

impl TransferRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

/// Applies the filter predicates shared by `count` and `find_all`, so a page
/// and its total always describe the same set of rows.
fn apply_filters(query: &mut SelectStatement, filter: &FindAllTransferRequest) {
    if let Some(transfer_type) = &filter.transfer_type {
        query.and_where(Expr::col(TransferSchema::Type).eq(transfer_type.as_str()));
    }

    if let Some(from) = &filter.from {
        query.and_where(
            Expr::expr(Func::lower(Expr::col(TransferSchema::From))).like(contains(from)),
        );
    }

    if let Some(to) = &filter.to {
        query.and_where(Expr::expr(Func::lower(Expr::col(TransferSchema::To))).like(contains(to)));
    }

    if let Some(amount_from) = filter.amount_from {
        query.and_where(Expr::col(TransferSchema::Amount).gte(amount_from));
    }

    if let Some(amount_to) = filter.amount_to {
        query.and_where(Expr::col(TransferSchema::Amount).lte(amount_to));
    }

    if let Some(time_from) = filter.time_from {
        query.and_where(Expr::col(TransferSchema::Time).gte(time_from));
    }

    if let Some(time_to) = filter.time_to {
        query.and_where(Expr::col(TransferSchema::Time).lte(time_to));
    }
}

/// Case-insensitive "contains" pattern; LIKE wildcards in the input match
/// literally.
fn contains(term: &str) -> LikeExpr {
    let escaped = term
        .to_lowercase()
        .replace('!', "!!")
        .replace('%', "!%")
        .replace('_', "!_");

    LikeExpr::new(format!("%{escaped}%")).escape('!')
}

#[async_trait]
impl TransferRepositoryTrait for TransferRepository {
    async fn count(&self, filter: &FindAllTransferRequest) -> Result<i64, AppError> {
        let (sql, values) = {
            let mut count_query = Query::select();
            count_query
                .expr(Func::count(Expr::col(TransferSchema::Id)))
                .from(TransferSchema::Table);

            apply_filters(&mut count_query, filter);
            count_query.build_sqlx(SqliteQueryBuilder)
        };
        debug!("📊 [Transfers] Count query: {sql} | Values: {:?}", values);

        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Transfers] Failed to count transfers: {e}");
                AppError::SqlxError(e)
            })?;

        info!("📈 [Transfers] Total matching transfers: {count}");

        Ok(count)
    }

    async fn find_all(&self, filter: &FindAllTransferRequest) -> Result<Vec<Transfer>, AppError> {
        info!("🔄 [Transfers] Fetching transfers with filter: {:?}", filter);

        let (sql, values) = {
            let mut select_query = Query::select();
            select_query
                .columns(TRANSFER_COLUMNS)
                .from(TransferSchema::Table)
                .order_by(TransferSchema::Time, Order::Desc)
                .order_by(TransferSchema::Id, Order::Desc);

            apply_filters(&mut select_query, filter);

            if let Some(limit) = filter.limit() {
                select_query.limit(limit);
            }

            if let Some(offset) = filter.offset() {
                select_query.offset(offset);
            }

            select_query.build_sqlx(SqliteQueryBuilder)
        };
        debug!("🧾 [Transfers] Generated SQL: {sql} | Values: {:?}", values);

        let transfers = sqlx::query_as_with::<_, Transfer, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Transfers] Failed to fetch transfers: {e}");
                AppError::SqlxError(e)
            })?;

        info!(
            "✅ [Transfers] Successfully fetched {} transfer(s)",
            transfers.len()
        );

        Ok(transfers)
    }

    async fn find_by_id(&self, id: i64) -> Result<Transfer, AppError> {
        info!("🆔 [Transfers] Finding transfer by ID: {id}");

        let (sql, values) = Query::select()
            .columns(TRANSFER_COLUMNS)
            .from(TransferSchema::Table)
            .and_where(Expr::col(TransferSchema::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        debug!("🧾 [Transfers] Executing query: {sql} | Values: {:?}", values);

        let row = sqlx::query_as_with::<_, Transfer, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Transfers] Database error while fetching transfer ID {id}: {e}");
                AppError::SqlxError(e)
            })?;

        match row {
            Some(transfer) => {
                info!(
                    "✅ [Transfers] Found transfer: ID={}, From={}, To={}, Amount={}",
                    transfer.id, transfer.from, transfer.to, transfer.amount
                );
                Ok(transfer)
            }
            None => {
                info!("🟡 [Transfers] No transfer found with ID: {id}");
                Err(AppError::NotFound(format!("Transfer with ID {id} not found")))
            }
        }
    }

    async fn create(&self, input: &CreateTransferRequest) -> Result<Transfer, AppError> {
        info!(
            "💸 [Transfers] Creating new transfer: {} → {} | Amount: {}",
            input.from, input.to, input.amount
        );

        let (sql, values) = Query::insert()
            .into_table(TransferSchema::Table)
            .columns([
                TransferSchema::Type,
                TransferSchema::From,
                TransferSchema::To,
                TransferSchema::Amount,
                TransferSchema::Time,
            ])
            .values([
                input.transfer_type.as_str().into(),
                input.from.as_str().into(),
                input.to.as_str().into(),
                input.amount.into(),
                input.time.into(),
            ])
            .map_err(|e| AppError::InternalError(format!("Invalid insert statement: {e:?}")))?
            .build_sqlx(SqliteQueryBuilder);

        debug!("🧾 [Transfers] INSERT query: {sql} | Values: {:?}", values);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await
            .map_err(|e| {
                error!(
                    "❌ [Transfers] Failed to create transfer ({} → {}): {e}",
                    input.from, input.to,
                );
                AppError::SqlxError(e)
            })?;

        let created = Transfer {
            id: result.last_insert_rowid(),
            transfer_type: input.transfer_type.clone(),
            from: input.from.clone(),
            to: input.to.clone(),
            amount: input.amount,
            time: input.time,
        };

        info!(
            "✅ [Transfers] Successfully created transfer ID: {} | Amount: {}",
            created.id, created.amount
        );

        Ok(created)
    }

    async fn update(&self, input: &UpdateTransferRequest) -> Result<Transfer, AppError> {
        info!("🔄 [Transfers] Updating transfer with ID: {}", input.id);

        let (sql, values) = Query::update()
            .table(TransferSchema::Table)
            .values([
                (TransferSchema::Type, input.transfer_type.as_str().into()),
                (TransferSchema::From, input.from.as_str().into()),
                (TransferSchema::To, input.to.as_str().into()),
                (TransferSchema::Amount, input.amount.into()),
                (TransferSchema::Time, input.time.into()),
            ])
            .and_where(Expr::col(TransferSchema::Id).eq(input.id))
            .build_sqlx(SqliteQueryBuilder);

        debug!("🧾 [Transfers] UPDATE query: {sql} | Values: {:?}", values);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await
            .map_err(|e| {
                error!(
                    "❌ [Transfers] Database error updating transfer ID {}: {e}",
                    input.id,
                );
                AppError::SqlxError(e)
            })?;

        if result.rows_affected() == 0 {
            error!(
                "❌ [Transfers] Update failed: Transfer with ID {} not found",
                input.id
            );
            return Err(AppError::NotFound(format!(
                "Transfer with ID {} not found",
                input.id
            )));
        }

        info!(
            "✅ [Transfers] Updated transfer ID {}: {} → {} | Amount: {}",
            input.id, input.from, input.to, input.amount
        );

        Ok(Transfer {
            id: input.id,
            transfer_type: input.transfer_type.clone(),
            from: input.from.clone(),
            to: input.to.clone(),
            amount: input.amount,
            time: input.time,
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        info!("🗑️ [Transfers] Deleting transfer with ID: {id}");

        let (sql, values) = Query::delete()
            .from_table(TransferSchema::Table)
            .and_where(Expr::col(TransferSchema::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        debug!("🧾 [Transfers] DELETE query: {sql} | Values: {:?}", values);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Transfers] Failed to delete transfer ID {id}: {e}");
                AppError::SqlxError(e)
            })?;

        if result.rows_affected() == 0 {
            error!("❌ [Transfers] Deletion failed: No transfer found with ID {id}");
            return Err(AppError::NotFound(format!(
                "Transfer with ID {id} not found"
            )));
        }

        info!("✅ [Transfers] Successfully deleted transfer ID: {id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionManager;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    async fn repository() -> TransferRepository {
        let pool = ConnectionManager::new_pool("sqlite::memory:", 1, true)
            .await
            .expect("in-memory database");
        TransferRepository::new(pool)
    }

    fn at(hour: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour)
    }

    fn new_transfer(kind: &str, from: &str, to: &str, amount: f64, hour: i64) -> CreateTransferRequest {
        CreateTransferRequest {
            transfer_type: kind.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            amount,
            time: at(hour),
        }
    }

    async fn seed(repo: &TransferRepository, transfers: &[CreateTransferRequest]) -> Vec<Transfer> {
        let mut created = Vec::new();
        for transfer in transfers {
            created.push(repo.create(transfer).await.unwrap());
        }
        created
    }

    #[tokio::test]
    async fn create_then_find_by_id_round_trips() {
        let repo = repository().await;
        let input = new_transfer("deposit", "bank", "alice", 100.25, 0);

        let created = repo.create(&input).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(found, created);
        assert_eq!(found.transfer_type, input.transfer_type);
        assert_eq!(found.from, input.from);
        assert_eq!(found.to, input.to);
        assert_eq!(found.amount, input.amount);
        assert_eq!(found.time, input.time);
    }

    #[tokio::test]
    async fn find_by_id_reports_not_found() {
        let repo = repository().await;

        let err = repo.find_by_id(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = repository().await;

        let first = repo.create(&new_transfer("fee", "a", "b", 1.0, 0)).await.unwrap();
        repo.delete_by_id(first.id).await.unwrap();
        let second = repo.create(&new_transfer("fee", "a", "b", 1.0, 1)).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn find_all_orders_by_time_descending() {
        let repo = repository().await;
        seed(
            &repo,
            &[
                new_transfer("fee", "a", "b", 1.0, 5),
                new_transfer("fee", "a", "b", 2.0, 1),
                new_transfer("fee", "a", "b", 3.0, 9),
            ],
        )
        .await;

        let transfers = repo.find_all(&FindAllTransferRequest::default()).await.unwrap();
        let amounts: Vec<f64> = transfers.iter().map(|t| t.amount).collect();

        assert_eq!(amounts, vec![3.0, 1.0, 2.0]);
    }

    #[tokio::test]
    async fn type_filter_is_exact() {
        let repo = repository().await;
        seed(
            &repo,
            &[
                new_transfer("payment", "a", "b", 1.0, 0),
                new_transfer("payments", "a", "b", 2.0, 1),
                new_transfer("Payment", "a", "b", 3.0, 2),
            ],
        )
        .await;

        let filter = FindAllTransferRequest {
            transfer_type: Some("payment".into()),
            ..Default::default()
        };
        let transfers = repo.find_all(&filter).await.unwrap();

        assert_eq!(transfers.len(), 1);
        assert!(transfers.iter().all(|t| t.transfer_type == "payment"));
        assert_eq!(repo.count(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn from_and_to_filters_match_substrings_case_insensitively() {
        let repo = repository().await;
        seed(
            &repo,
            &[
                new_transfer("payment", "Alice", "shop", 1.0, 0),
                new_transfer("payment", "kamali", "Shopify", 2.0, 1),
                new_transfer("payment", "bob", "SHOP", 3.0, 2),
                new_transfer("payment", "carol", "bank", 4.0, 3),
            ],
        )
        .await;

        let by_sender = FindAllTransferRequest {
            from: Some("ALI".into()),
            ..Default::default()
        };
        let mut senders: Vec<String> = repo
            .find_all(&by_sender)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.from)
            .collect();
        senders.sort();
        assert_eq!(senders, vec!["Alice".to_string(), "kamali".to_string()]);

        let by_recipient = FindAllTransferRequest {
            to: Some("shop".into()),
            ..Default::default()
        };
        assert_eq!(repo.count(&by_recipient).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn like_wildcards_in_filters_match_literally() {
        let repo = repository().await;
        seed(
            &repo,
            &[
                new_transfer("payment", "100%_club", "b", 1.0, 0),
                new_transfer("payment", "100 club", "b", 2.0, 1),
            ],
        )
        .await;

        let filter = FindAllTransferRequest {
            from: Some("%_".into()),
            ..Default::default()
        };
        let transfers = repo.find_all(&filter).await.unwrap();

        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].from, "100%_club");
    }

    #[tokio::test]
    async fn amount_bounds_are_inclusive() {
        let repo = repository().await;
        seed(
            &repo,
            &[
                new_transfer("fee", "a", "b", 0.0, 0),
                new_transfer("fee", "a", "b", 9.99, 1),
                new_transfer("fee", "a", "b", 10.0, 2),
                new_transfer("fee", "a", "b", 15.0, 3),
                new_transfer("fee", "a", "b", 20.0, 4),
                new_transfer("fee", "a", "b", 20.01, 5),
            ],
        )
        .await;

        let filter = FindAllTransferRequest {
            amount_from: Some(10.0),
            amount_to: Some(20.0),
            ..Default::default()
        };
        let transfers = repo.find_all(&filter).await.unwrap();

        assert_eq!(transfers.len(), 3);
        assert!(
            transfers
                .iter()
                .all(|t| (10.0..=20.0).contains(&t.amount))
        );
    }

    #[tokio::test]
    async fn zero_amount_bound_is_a_real_bound() {
        let repo = repository().await;
        seed(
            &repo,
            &[
                new_transfer("refund", "a", "b", -5.0, 0),
                new_transfer("fee", "a", "b", 0.0, 1),
                new_transfer("fee", "a", "b", 3.0, 2),
            ],
        )
        .await;

        let positive_lower = FindAllTransferRequest {
            amount_from: Some(1.0),
            ..Default::default()
        };
        let amounts: Vec<f64> = repo
            .find_all(&positive_lower)
            .await
            .unwrap()
            .iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(amounts, vec![3.0]);

        let zero_lower = FindAllTransferRequest {
            amount_from: Some(0.0),
            ..Default::default()
        };
        let amounts: Vec<f64> = repo
            .find_all(&zero_lower)
            .await
            .unwrap()
            .iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(amounts, vec![3.0, 0.0]);
    }

    #[tokio::test]
    async fn time_bounds_are_inclusive() {
        let repo = repository().await;
        seed(
            &repo,
            &(0..6)
                .map(|hour| new_transfer("fee", "a", "b", hour as f64, hour))
                .collect::<Vec<_>>(),
        )
        .await;

        let filter = FindAllTransferRequest {
            time_from: Some(at(2)),
            time_to: Some(at(4)),
            ..Default::default()
        };
        let times: Vec<DateTime<Utc>> = repo
            .find_all(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.time)
            .collect();

        assert_eq!(times, vec![at(4), at(3), at(2)]);
    }

    #[tokio::test]
    async fn count_matches_unpaginated_list() {
        let repo = repository().await;
        seed(
            &repo,
            &[
                new_transfer("payment", "alice", "bob", 12.0, 0),
                new_transfer("payment", "alicia", "bob", 30.0, 1),
                new_transfer("deposit", "bank", "alice", 15.0, 2),
                new_transfer("payment", "Malik", "carol", 18.0, 3),
            ],
        )
        .await;

        let filters = [
            FindAllTransferRequest::default(),
            FindAllTransferRequest {
                transfer_type: Some("payment".into()),
                ..Default::default()
            },
            FindAllTransferRequest {
                from: Some("ali".into()),
                amount_to: Some(20.0),
                ..Default::default()
            },
            FindAllTransferRequest {
                time_from: Some(at(1)),
                page: Some(3),
                ..Default::default()
            },
        ];

        for filter in &filters {
            let listed = repo.find_all(filter).await.unwrap();
            let total = repo.count(filter).await.unwrap();
            assert_eq!(total, listed.len() as i64, "filter: {filter:?}");
        }
    }

    #[tokio::test]
    async fn pagination_returns_requested_window() {
        let repo = repository().await;
        let seeded = seed(
            &repo,
            &(0..25)
                .map(|hour| new_transfer("fee", "a", "b", hour as f64, hour))
                .collect::<Vec<_>>(),
        )
        .await;

        let mut ranked = seeded.clone();
        ranked.sort_by(|a, b| b.time.cmp(&a.time));

        let page_two = FindAllTransferRequest {
            page: Some(2),
            page_size: Some(10),
            ..Default::default()
        };
        let transfers = repo.find_all(&page_two).await.unwrap();
        assert_eq!(transfers, ranked[10..20].to_vec());
        assert_eq!(repo.count(&page_two).await.unwrap(), 25);

        let last_page = FindAllTransferRequest {
            page: Some(3),
            page_size: Some(10),
            ..Default::default()
        };
        assert_eq!(repo.find_all(&last_page).await.unwrap().len(), 5);

        let first_page = FindAllTransferRequest {
            page: Some(0),
            page_size: Some(10),
            ..Default::default()
        };
        assert_eq!(
            repo.find_all(&first_page).await.unwrap(),
            ranked[..10].to_vec()
        );
    }

    #[tokio::test]
    async fn oversized_pagination_is_clamped() {
        let repo = repository().await;
        seed(
            &repo,
            &(0..3)
                .map(|hour| new_transfer("fee", "a", "b", 1.0, hour))
                .collect::<Vec<_>>(),
        )
        .await;

        let huge_page_size = FindAllTransferRequest {
            page_size: Some(u64::MAX),
            ..Default::default()
        };
        assert_eq!(repo.find_all(&huge_page_size).await.unwrap().len(), 3);

        let huge_offset = FindAllTransferRequest {
            page: Some(3),
            page_size: Some(1 << 62),
            ..Default::default()
        };
        assert!(repo.find_all(&huge_offset).await.unwrap().is_empty());
        assert_eq!(repo.count(&huge_offset).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn update_overwrites_every_field() {
        let repo = repository().await;
        let created = repo
            .create(&new_transfer("payment", "alice", "bob", 10.0, 0))
            .await
            .unwrap();

        let update = UpdateTransferRequest {
            id: created.id,
            transfer_type: "refund".into(),
            from: "bob".into(),
            to: "alice".into(),
            amount: 7.5,
            time: at(3),
        };
        repo.update(&update).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found.transfer_type, "refund");
        assert_eq!(found.from, "bob");
        assert_eq!(found.to, "alice");
        assert_eq!(found.amount, 7.5);
        assert_eq!(found.time, at(3));
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_id_report_not_found() {
        let repo = repository().await;

        let update = UpdateTransferRequest {
            id: 404,
            transfer_type: "fee".into(),
            from: "a".into(),
            to: "b".into(),
            amount: 1.0,
            time: at(0),
        };

        assert!(matches!(
            repo.update(&update).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            repo.delete_by_id(404).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let repo = repository().await;
        let created = repo
            .create(&new_transfer("fee", "a", "b", 1.0, 0))
            .await
            .unwrap();

        repo.delete_by_id(created.id).await.unwrap();

        assert!(matches!(
            repo.find_by_id(created.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert_eq!(
            repo.count(&FindAllTransferRequest::default()).await.unwrap(),
            0
        );
    }
}
