use crate::{config::ORDERS_TABLE, data::Order};
use supabase::RowStore;

pub async fn record_order<R>(rows: &R, order: &Order) -> Result<(), supabase::Error>
where
	R: RowStore + ?Sized,
{
	log::info!(target: "orders", "recording download of {} by {}", order.project_id, order.user_email);
	rows.insert(ORDERS_TABLE, std::slice::from_ref(order)).await
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		data::{Category, Project},
		testing::MemoryBackend,
	};
	use futures::executor::block_on;
	use serde_json::json;

	#[test]
	fn order_is_inserted() {
		let backend = MemoryBackend::default();
		let project = Project {
			id: "12".into(),
			title: "Auth kit".into(),
			category: Category::Fullstack,
			..Default::default()
		};
		let order = Order::for_download(&project, None, "2025-05-05T00:00:00Z".into());
		block_on(record_order(&backend, &order)).unwrap();
		let rows = backend.rows(ORDERS_TABLE);
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0]["project_id"], json!("12"));
		assert_eq!(rows[0]["user_email"], json!("guest@mieltecity.com"));
		assert_eq!(rows[0]["amount"], json!(0));
	}

	#[test]
	fn service_error_is_surfaced() {
		let backend = MemoryBackend::default();
		*backend.fail_inserts_with.borrow_mut() = Some(("42501".into(), "permission denied for table orders".into()));
		let order = Order::for_download(&Project::default(), None, String::new());
		let err = block_on(record_order(&backend, &order)).unwrap_err();
		assert_eq!(err.to_string(), "permission denied for table orders");
	}
}
