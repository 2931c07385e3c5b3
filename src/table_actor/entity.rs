//! [`ActorEntity`] implementation for [`Table`].
//!
//! The hooks validate, call [`session`](super::session) to mutate the draft,
//! and publish events. The actor commits the draft only after a hook returns
//! `Ok`, so every early return below leaves the registry untouched.

use async_trait::async_trait;
use tracing::{info, warn};

use super::actions::{TableAction, TableActionResult};
use super::error::TableError;
use super::LedgerContext;
use crate::config::RemovalPolicy;
use crate::events::TableEvent;
use crate::framework::ActorEntity;
use crate::model::{Bill, Table, TableCreate, TableNumber, TableStatus, TableUpdate};

impl Table {
    fn bill_at(&self, ctx: &LedgerContext, as_of: Option<chrono::DateTime<chrono::Utc>>) -> Bill {
        let as_of = as_of.unwrap_or_else(|| ctx.clock.now());
        Bill::compute(self, as_of, ctx.config.tariff_unit)
    }

    /// Applies a status change and publishes what it did.
    fn change_status(&mut self, to: TableStatus, ctx: &LedgerContext, closing_bill: Option<Bill>) {
        let closing_bill = match closing_bill {
            Some(bill) => Some(bill),
            None if self.is_occupied() && to == TableStatus::Available => Some(self.bill_at(ctx, None)),
            None => None,
        };

        let transition = self.apply_status(to, ctx.clock.now(), &ctx.config.default_client_name);
        if !transition.is_change() {
            return;
        }
        if transition.closes_session() {
            if let Some(bill) = closing_bill {
                info!(table = %self.number, total = %bill.total_cost, "Session closed");
                ctx.events.publish(TableEvent::SessionClosed { bill });
            }
        }
        ctx.events.publish(TableEvent::StatusChanged {
            number: self.number,
            from: transition.from,
            to: transition.to,
        });
    }
}

#[async_trait]
impl ActorEntity for Table {
    type Id = TableNumber;
    type Create = TableCreate;
    type Update = TableUpdate;
    type Action = TableAction;
    type ActionResult = TableActionResult;
    type Context = LedgerContext;
    type Error = TableError;

    fn id(&self) -> TableNumber {
        self.number
    }

    fn from_create_params(params: TableCreate, ctx: &LedgerContext) -> Result<Self, TableError> {
        if params.number.0 == 0 {
            return Err(TableError::Validation("table number must be positive".into()));
        }
        let mut table = Table::new(params.number, ctx.config.tariff_default);
        if let Some(tariff) = params.tariff {
            table.set_tariff(tariff)?;
        }
        // A table created occupied starts its session right away.
        table.apply_status(params.status, ctx.clock.now(), &ctx.config.default_client_name);
        Ok(table)
    }

    async fn on_create(&mut self, ctx: &LedgerContext) -> Result<(), TableError> {
        info!(table = %self.number, status = %self.status, tariff = %self.tariff, "Table added");
        ctx.events.publish(TableEvent::TableAdded {
            number: self.number,
        });
        Ok(())
    }

    async fn on_update(&mut self, update: TableUpdate, _ctx: &LedgerContext) -> Result<(), TableError> {
        if let Some(tariff) = update.tariff {
            self.set_tariff(tariff)?;
        }
        if let Some(name) = update.client_name {
            self.rename_client(name)?;
        }
        Ok(())
    }

    /// Applies the configured removal policy to an occupied table.
    async fn on_delete(&mut self, ctx: &LedgerContext) -> Result<(), TableError> {
        if self.is_occupied() {
            match ctx.config.removal_policy {
                RemovalPolicy::RequireIdle => {
                    return Err(TableError::InvalidState {
                        number: self.number,
                        status: self.status,
                        operation: "remove",
                    });
                }
                RemovalPolicy::Allow => {
                    warn!(table = %self.number, products = self.products.len(), "Removing table with a running session");
                }
                RemovalPolicy::ForceClose => {
                    let bill = self.bill_at(ctx, None);
                    info!(table = %self.number, total = %bill.total_cost, "Session force-closed on removal");
                    ctx.events.publish(TableEvent::SessionClosed { bill });
                }
            }
        }
        ctx.events.publish(TableEvent::TableRemoved {
            number: self.number,
        });
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: TableAction,
        ctx: &LedgerContext,
    ) -> Result<TableActionResult, TableError> {
        match action {
            TableAction::SetStatus(to) => {
                self.change_status(to, ctx, None);
                Ok(TableActionResult::SetStatus(self.clone()))
            }
            TableAction::AttachProduct(item) => {
                self.attach(item.clone())?;
                ctx.events.publish(TableEvent::ProductAttached {
                    number: self.number,
                    item,
                });
                Ok(TableActionResult::AttachProduct(self.clone()))
            }
            TableAction::AttachFromCatalog(sku) => {
                // Checked before the catalog is touched so no stock leaks.
                self.require_occupied("attach a product to")?;
                let product = ctx.catalog.reserve_stock(sku, 1).await?;
                let item = product.line_item();
                self.attach(item.clone())?;
                ctx.events.publish(TableEvent::ProductAttached {
                    number: self.number,
                    item,
                });
                Ok(TableActionResult::AttachFromCatalog(self.clone()))
            }
            TableAction::ComputeBill { as_of } => {
                Ok(TableActionResult::ComputeBill(self.bill_at(ctx, as_of)))
            }
            TableAction::EndSession { as_of } => {
                let bill = self.bill_at(ctx, as_of);
                self.change_status(TableStatus::Available, ctx, Some(bill.clone()));
                Ok(TableActionResult::EndSession(bill))
            }
        }
    }
}
