use diesel::prelude::*;

use crate::domain::offer::{NewProductOffer, OfferSummary, ProductOffer};
use crate::domain::types::{CatalogId, OfferId, Price};
use crate::models::offer::{NewProductOffer as DbNewProductOffer, ProductOffer as DbProductOffer};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, OfferListQuery, OfferReader, OfferWriter};

impl OfferReader for DieselRepository {
    fn get_offer_by_id(&self, id: OfferId) -> RepositoryResult<Option<ProductOffer>> {
        use crate::schema::product_offers;

        let mut conn = self.conn()?;

        let offer = product_offers::table
            .filter(product_offers::id.eq(id.get()))
            .first::<DbProductOffer>(&mut conn)
            .optional()?;

        let offer = offer.map(TryInto::try_into).transpose()?;
        Ok(offer)
    }

    fn list_offers(&self, query: OfferListQuery) -> RepositoryResult<(usize, Vec<ProductOffer>)> {
        use crate::schema::product_offers;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut offers = product_offers::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(catalog_id) = query.catalog_id {
                offers = offers.filter(product_offers::catalog_id.eq(catalog_id.get()));
            }

            if let Some(vendor_id) = query.vendor_id {
                offers = offers.filter(product_offers::vendor_id.eq(vendor_id.get()));
            }

            if query.active_only {
                offers = offers.filter(product_offers::is_active.eq(true));
            }

            offers
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut offers = query_builder();
        if let Some(pagination) = &query.pagination {
            offers = offers
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let offers = offers
            .order(product_offers::id.asc())
            .load::<DbProductOffer>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<ProductOffer>, _>>()?;

        Ok((total, offers))
    }

    fn list_active_offer_summaries(
        &self,
        catalog_id: CatalogId,
    ) -> RepositoryResult<Vec<OfferSummary>> {
        use crate::schema::product_offers;

        let mut conn = self.conn()?;

        let rows: Vec<(i32, f64)> = product_offers::table
            .filter(product_offers::catalog_id.eq(catalog_id.get()))
            .filter(product_offers::is_active.eq(true))
            .select((product_offers::vendor_id, product_offers::price))
            .load(&mut conn)?;

        let summaries = rows
            .into_iter()
            .map(|(vendor_id, price)| {
                Ok(OfferSummary {
                    vendor_id: vendor_id.try_into()?,
                    price: Price::new(price)?,
                })
            })
            .collect::<Result<Vec<OfferSummary>, crate::domain::types::TypeConstraintError>>()?;

        Ok(summaries)
    }
}

impl OfferWriter for DieselRepository {
    fn create_offer(&self, offer: &NewProductOffer) -> RepositoryResult<ProductOffer> {
        use crate::schema::product_offers;

        let mut conn = self.conn()?;
        let db_offer: DbNewProductOffer = offer.clone().into();

        let created: DbProductOffer = diesel::insert_into(product_offers::table)
            .values(&db_offer)
            .get_result(&mut conn)?;

        Ok(created.try_into()?)
    }
}
