//! Design catalog: designs, their images, categories and tags.

use atelier_core::blob::{BlobStore, StoredBlob};
use atelier_core::design::{
    authorize_create, image_extension, is_primary_image, moderate as moderate_status,
    validate_dimension, validate_price, validate_title, DesignStatus, ModerationDecision,
};
use atelier_core::error::CoreError;
use atelier_core::money::Money;
use atelier_core::notification::NotificationDraft;
use atelier_core::pagination::Page;
use atelier_core::policy::{
    can_modify_design, can_modify_design_images, can_see_category, can_see_design,
    design_list_scope, DesignerFilter,
};
use atelier_core::roles::{Actor, Requester};
use atelier_core::types::DbId;
use atelier_db::models::category::{Category, CreateCategory, UpdateCategory};
use atelier_db::models::design::{
    CreateDesign, CreateDesignImage, Design, DesignImage, DesignListFilter, UpdateDesign,
};
use atelier_db::models::tag::Tag;
use atelier_db::repositories::{CategoryRepo, DesignImageRepo, DesignRepo, TagRepo};
use sqlx::PgPool;

use super::{not_found, notifications};
use crate::error::AppResult;

// ---------------------------------------------------------------------------
// Designs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NewDesign {
    pub title: String,
    pub description: String,
    pub category_id: Option<DbId>,
    pub price: Money,
    /// Ignored: new designs always wait for moderation.
    pub status: Option<DesignStatus>,
    pub is_premium: bool,
    pub width: Option<Money>,
    pub height: Option<Money>,
    pub tag_ids: Vec<DbId>,
}

/// Optional filters on the design listing, before visibility is applied.
#[derive(Debug, Clone, Default)]
pub struct DesignQuery {
    pub designer: Option<DesignerFilter>,
    pub category_id: Option<DbId>,
    pub status: Option<DesignStatus>,
    pub is_premium: Option<bool>,
    pub search: Option<String>,
    pub tag_id: Option<DbId>,
}

pub async fn create_design(pool: &PgPool, actor: &Actor, input: NewDesign) -> AppResult<Design> {
    authorize_create(actor)?;
    validate_title(&input.title)?;
    validate_price(input.price)?;
    validate_dimension("width", input.width)?;
    validate_dimension("height", input.height)?;

    if let Some(category_id) = input.category_id {
        ensure_category_usable(pool, &Requester::from(*actor), category_id).await?;
    }
    let mut tag_ids = input.tag_ids;
    tag_ids.sort_unstable();
    tag_ids.dedup();
    ensure_tags_exist(pool, &tag_ids).await?;

    let create = CreateDesign {
        title: input.title.trim().to_string(),
        description: input.description,
        designer_id: actor.id,
        category_id: input.category_id,
        price: input.price,
        status: DesignStatus::on_create(input.status),
        is_premium: input.is_premium,
        width: input.width,
        height: input.height,
    };

    let mut tx = pool.begin().await?;
    let design = DesignRepo::create(&mut *tx, &create).await?;
    if !tag_ids.is_empty() {
        DesignRepo::attach_tags(&mut *tx, design.id, &tag_ids).await?;
    }
    tx.commit().await?;

    tracing::info!(design_id = design.id, designer_id = actor.id, "Design submitted for moderation");
    Ok(design)
}

/// Fetch a visible design and count the view.
pub async fn view_design(pool: &PgPool, requester: &Requester, id: DbId) -> AppResult<Design> {
    visible_design(pool, requester, id).await?;
    DesignRepo::increment_views(pool, id)
        .await?
        .ok_or_else(|| not_found("Design", id))
}

/// Tag ids of a design the caller has already resolved.
pub async fn design_tags(pool: &PgPool, id: DbId) -> AppResult<Vec<DbId>> {
    Ok(DesignRepo::tag_ids(pool, id).await?)
}

/// Images of a design the caller has already resolved.
pub async fn design_images(pool: &PgPool, id: DbId) -> AppResult<Vec<DesignImage>> {
    Ok(DesignImageRepo::list_for_design(pool, id).await?)
}

pub async fn list_designs(
    pool: &PgPool,
    requester: &Requester,
    query: DesignQuery,
    page: Page,
) -> AppResult<(Vec<Design>, i64)> {
    let Some(scope) = design_list_scope(requester, query.designer) else {
        return Ok((Vec::new(), 0));
    };
    let filter = DesignListFilter {
        category_id: query.category_id,
        status: query.status,
        is_premium: query.is_premium,
        search: query.search.filter(|s| !s.trim().is_empty()),
        tag_id: query.tag_id,
        ..DesignListFilter::new(scope)
    };
    let items = DesignRepo::list(pool, &filter, page.limit, page.offset).await?;
    let total = DesignRepo::count(pool, &filter).await?;
    Ok((items, total))
}

pub async fn update_design(
    pool: &PgPool,
    actor: &Actor,
    id: DbId,
    patch: UpdateDesign,
) -> AppResult<Design> {
    let design = visible_design(pool, &Requester::from(*actor), id).await?;
    if !can_modify_design(actor, &design.facts()?) {
        return Err(CoreError::forbidden("You can only edit your own designs.").into());
    }

    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    validate_dimension("width", patch.width.flatten())?;
    validate_dimension("height", patch.height.flatten())?;
    if let Some(Some(category_id)) = patch.category_id {
        ensure_category_usable(pool, &Requester::from(*actor), category_id).await?;
    }

    DesignRepo::update(pool, id, &patch)
        .await?
        .ok_or_else(|| not_found("Design", id))
}

pub async fn delete_design(pool: &PgPool, actor: &Actor, id: DbId) -> AppResult<()> {
    let design = visible_design(pool, &Requester::from(*actor), id).await?;
    if !can_modify_design(actor, &design.facts()?) {
        return Err(CoreError::forbidden("You can only delete your own designs.").into());
    }
    if !DesignRepo::delete(pool, id).await? {
        return Err(not_found("Design", id));
    }
    tracing::info!(design_id = id, actor_id = actor.id, "Design deleted");
    Ok(())
}

/// Staff approval or rejection; the designer is notified in the same
/// transaction.
pub async fn moderate(
    pool: &PgPool,
    actor: &Actor,
    id: DbId,
    decision: ModerationDecision,
) -> AppResult<Design> {
    let mut tx = pool.begin().await?;
    let design = DesignRepo::find_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| not_found("Design", id))?;
    let target = moderate_status(actor, design.status()?, decision)?;

    let updated = DesignRepo::set_status(&mut *tx, id, target).await?;
    let draft =
        NotificationDraft::design_moderated(updated.designer_id, id, &updated.title, decision);
    notifications::emit(&mut *tx, &draft).await?;
    tx.commit().await?;

    tracing::info!(design_id = id, actor_id = actor.id, status = %target, "Design moderated");
    Ok(updated)
}

/// Atomic like counter with no per-user dedup. Returns the new count.
pub async fn like_design(pool: &PgPool, requester: &Requester, id: DbId) -> AppResult<i64> {
    visible_design(pool, requester, id).await?;
    DesignRepo::increment_likes(pool, id)
        .await?
        .ok_or_else(|| not_found("Design", id))
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// One file from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Store `files` and attach them to the design in upload order.
///
/// Only the first image can become primary, and only when the flag is the
/// string `true`. The caption applies to every image.
pub async fn upload_images(
    pool: &PgPool,
    blobs: &dyn BlobStore,
    requester: &Requester,
    id: DbId,
    files: Vec<UploadedFile>,
    is_primary: Option<&str>,
    caption: Option<&str>,
) -> AppResult<Vec<DesignImage>> {
    let design = visible_design(pool, requester, id).await?;
    if !can_modify_design_images(requester, &design.facts()?) {
        return Err(CoreError::forbidden(
            "You can only upload images to your own designs.",
        )
        .into());
    }
    if files.is_empty() {
        return Err(CoreError::validation("No images provided").into());
    }
    for file in &files {
        image_extension(&file.file_name)?;
    }

    let mut stored = Vec::with_capacity(files.len());
    for file in &files {
        match blobs.store(&file.file_name, &file.bytes).await {
            Ok(blob) => stored.push(blob),
            Err(e) => {
                discard_blobs(blobs, &stored).await;
                return Err(e.into());
            }
        }
    }

    let caption = caption.map(str::trim).filter(|c| !c.is_empty());
    match insert_images(pool, id, &stored, is_primary, caption).await {
        Ok(images) => {
            tracing::info!(design_id = id, count = images.len(), "Design images uploaded");
            Ok(images)
        }
        Err(e) => {
            discard_blobs(blobs, &stored).await;
            Err(e)
        }
    }
}

async fn insert_images(
    pool: &PgPool,
    design_id: DbId,
    stored: &[StoredBlob],
    is_primary: Option<&str>,
    caption: Option<&str>,
) -> AppResult<Vec<DesignImage>> {
    let mut tx = pool.begin().await?;
    let mut images = Vec::with_capacity(stored.len());
    for (index, blob) in stored.iter().enumerate() {
        let primary = is_primary_image(index, is_primary);
        if primary {
            DesignImageRepo::clear_primary(&mut *tx, design_id).await?;
        }
        let create = CreateDesignImage {
            design_id,
            image_url: blob.url.clone(),
            is_primary: primary,
            caption: caption.map(str::to_string),
        };
        images.push(DesignImageRepo::create(&mut *tx, &create).await?);
    }
    tx.commit().await?;
    Ok(images)
}

/// Best effort; a blob that cannot be removed is only logged.
async fn discard_blobs(blobs: &dyn BlobStore, stored: &[StoredBlob]) {
    for blob in stored {
        if let Err(e) = blobs.delete(&blob.key).await {
            tracing::warn!(key = %blob.key, error = %e, "Failed to remove orphaned blob");
        }
    }
}

pub async fn list_images(
    pool: &PgPool,
    requester: &Requester,
    id: DbId,
) -> AppResult<Vec<DesignImage>> {
    visible_design(pool, requester, id).await?;
    Ok(DesignImageRepo::list_for_design(pool, id).await?)
}

async fn visible_design(pool: &PgPool, requester: &Requester, id: DbId) -> AppResult<Design> {
    let design = DesignRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found("Design", id))?;
    if can_see_design(requester, &design.facts()?) {
        Ok(design)
    } else {
        Err(not_found("Design", id))
    }
}

// ---------------------------------------------------------------------------
// Categories and tags
// ---------------------------------------------------------------------------

pub async fn list_categories(pool: &PgPool, requester: &Requester) -> AppResult<Vec<Category>> {
    Ok(CategoryRepo::list(pool, requester.is_staff()).await?)
}

pub async fn get_category(pool: &PgPool, requester: &Requester, id: DbId) -> AppResult<Category> {
    CategoryRepo::find_by_id(pool, id)
        .await?
        .filter(|c| can_see_category(requester, c.is_active))
        .ok_or_else(|| not_found("Category", id))
}

/// Callers must already hold staff rights.
pub async fn create_category(pool: &PgPool, input: &CreateCategory) -> AppResult<Category> {
    validate_name("name", &input.name)?;
    let category = CategoryRepo::create(pool, input).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok(category)
}

/// Callers must already hold staff rights.
pub async fn update_category(
    pool: &PgPool,
    id: DbId,
    input: &UpdateCategory,
) -> AppResult<Category> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    CategoryRepo::update(pool, id, input)
        .await?
        .ok_or_else(|| not_found("Category", id))
}

pub async fn list_tags(pool: &PgPool) -> AppResult<Vec<Tag>> {
    Ok(TagRepo::list(pool).await?)
}

pub async fn create_tag(pool: &PgPool, name: &str) -> AppResult<Tag> {
    validate_name("name", name)?;
    Ok(TagRepo::create(pool, name.trim()).await?)
}

fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

async fn ensure_category_usable(
    pool: &PgPool,
    requester: &Requester,
    category_id: DbId,
) -> AppResult<()> {
    let usable = CategoryRepo::find_by_id(pool, category_id)
        .await?
        .is_some_and(|c| can_see_category(requester, c.is_active));
    if usable {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Category {category_id} does not exist")).into())
    }
}

async fn ensure_tags_exist(pool: &PgPool, tag_ids: &[DbId]) -> AppResult<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let found = TagRepo::existing_ids(pool, tag_ids).await?;
    let missing: Vec<String> = tag_ids
        .iter()
        .filter(|id| !found.contains(*id))
        .map(|id| id.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Unknown tag id(s): {}", missing.join(", "))).into())
    }
}
