//! SQLite-backed [`RecipeStore`].
//!
//! All validation and SQL for the recipe service lives here; the HTTP layer
//! is a thin adapter over these methods. Every multi-statement operation runs
//! inside one explicit rusqlite transaction so partial writes are never
//! visible and roll back on any failure.

use std::collections::HashSet;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StoreError;
use crate::types::{
    Ingredient, IngredientDetail, IngredientId, RecipeId, RecipeItem, RecipeSummary,
    ScaledIngredient, ScaledRecipe, SortOrder,
};

// User-facing messages, kept verbatim from the existing API contract.
const MSG_RECIPE_NAME_REQUIRED: &str = "El nombre de la receta es obligatorio.";
const MSG_ITEMS_REQUIRED: &str = "Debes añadir al menos un ingrediente.";
const MSG_ITEM_INVALID: &str = "Cada ingrediente necesita selección y gramos por kg válidos.";
const MSG_ITEM_REPEATED: &str = "No repitas ingredientes dentro de la misma receta.";
const MSG_ITEM_UNKNOWN: &str = "Ingrediente seleccionado no existe.";
const MSG_RECIPE_EXISTS: &str = "Ya existe una receta con ese nombre.";
const MSG_KG_NOT_POSITIVE: &str = "Los kilos deben ser mayores a cero.";
const MSG_RECIPE_NOT_FOUND: &str = "Receta no encontrada.";
const MSG_INGREDIENT_NAME_REQUIRED: &str = "El nombre del ingrediente es obligatorio.";
const MSG_INGREDIENT_EXISTS: &str = "Ya existe un ingrediente con ese nombre.";
const MSG_INGREDIENT_IN_USE: &str = "No se puede borrar: está usado en una receta.";
const MSG_INGREDIENT_NOT_FOUND: &str = "Ingrediente no encontrado.";

/// The fixed starter catalog inserted into an empty database.
const DEFAULT_INGREDIENTS: [&str; 5] =
    ["Leche entera", "Nata montar", "LPD", "Yemas", "Sacarosa"];

/// Grams per kilogram for the seeded example recipe.
const SEED_RECIPE_NAME: &str = "Stracciatella";
const SEED_RECIPE_NOTES: &str = "Receta base de ejemplo para arrancar.";
const SEED_RECIPE_ITEMS: [(&str, f64); 5] = [
    ("Leche entera", 333.0),
    ("Nata montar", 292.0),
    ("LPD", 83.0),
    ("Yemas", 83.0),
    ("Sacarosa", 208.0),
];

/// SQLite-backed store for recipes and ingredients.
///
/// Holds a single connection; callers serialize access (the server wraps the
/// store in an async mutex). Name ordering everywhere uses SQLite's default
/// BINARY collation so results are deterministic across locales.
pub struct RecipeStore {
    conn: Connection,
}

impl RecipeStore {
    /// Opens (or creates) the database at `path` and seeds starter data.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = crate::schema::open_database(path)?;
        let mut store = RecipeStore { conn };
        store.seed_defaults()?;
        Ok(store)
    }

    /// Opens an in-memory database (for testing) and seeds starter data.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = crate::schema::open_in_memory()?;
        let mut store = RecipeStore { conn };
        store.seed_defaults()?;
        Ok(store)
    }

    /// Inserts the default ingredient catalog and example recipe if the
    /// database is empty. Idempotent; runs in one transaction.
    pub fn seed_defaults(&mut self) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        let ingredient_count: i64 =
            tx.query_row("SELECT COUNT(*) FROM ingredients", [], |row| row.get(0))?;
        if ingredient_count == 0 {
            for name in DEFAULT_INGREDIENTS {
                tx.execute("INSERT INTO ingredients (name) VALUES (?1)", params![name])?;
            }
        }

        let recipe_count: i64 =
            tx.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        if recipe_count == 0 {
            tx.execute(
                "INSERT INTO recipes (name, notes) VALUES (?1, ?2)",
                params![SEED_RECIPE_NAME, SEED_RECIPE_NOTES],
            )?;
            let recipe_id = tx.last_insert_rowid();
            for (ingredient, grams_per_kg) in SEED_RECIPE_ITEMS {
                let ingredient_id: i64 = tx.query_row(
                    "SELECT id FROM ingredients WHERE name = ?1",
                    params![ingredient],
                    |row| row.get(0),
                )?;
                tx.execute(
                    "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, grams_per_kg) \
                     VALUES (?1, ?2, ?3)",
                    params![recipe_id, ingredient_id, grams_per_kg],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Lists all recipes ordered by name ascending.
    pub fn list_recipes(&self) -> Result<Vec<RecipeSummary>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, notes FROM recipes ORDER BY name ASC")?;
        let recipes = stmt
            .query_map([], |row| {
                Ok(RecipeSummary {
                    id: RecipeId(row.get(0)?),
                    name: row.get(1)?,
                    notes: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(recipes)
    }

    /// Creates a recipe with its ingredient lines atomically.
    ///
    /// Validation order: trimmed name non-empty, at least one item, every
    /// item has a positive ingredient id and grams per kg, no ingredient
    /// repeats within the submission, every referenced ingredient exists.
    /// Either the recipe and all its lines persist, or nothing does.
    pub fn create_recipe(
        &mut self,
        name: &str,
        notes: &str,
        items: &[RecipeItem],
    ) -> Result<RecipeSummary, StoreError> {
        let name = name.trim();
        let notes = notes.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(MSG_RECIPE_NAME_REQUIRED.into()));
        }
        if items.is_empty() {
            return Err(StoreError::Validation(MSG_ITEMS_REQUIRED.into()));
        }
        let mut used = HashSet::new();
        for item in items {
            if item.ingredient_id <= 0 || item.grams_per_kg <= 0.0 {
                return Err(StoreError::Validation(MSG_ITEM_INVALID.into()));
            }
            if !used.insert(item.ingredient_id) {
                return Err(StoreError::Validation(MSG_ITEM_REPEATED.into()));
            }
        }

        let tx = self.conn.transaction()?;

        match tx.execute(
            "INSERT INTO recipes (name, notes) VALUES (?1, ?2)",
            params![name, notes],
        ) {
            Err(e) if is_unique_violation(&e) => {
                return Err(StoreError::Conflict(MSG_RECIPE_EXISTS.into()));
            }
            other => {
                other?;
            }
        }
        let recipe_id = tx.last_insert_rowid();

        for item in items {
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM ingredients WHERE id = ?1)",
                params![item.ingredient_id],
                |row| row.get(0),
            )?;
            if !exists {
                // Dropping the transaction rolls back the recipe row.
                return Err(StoreError::Validation(MSG_ITEM_UNKNOWN.into()));
            }
            tx.execute(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, grams_per_kg) \
                 VALUES (?1, ?2, ?3)",
                params![recipe_id, item.ingredient_id, item.grams_per_kg],
            )?;
        }

        tx.commit()?;
        Ok(RecipeSummary {
            id: RecipeId(recipe_id),
            name: name.to_string(),
            notes: notes.to_string(),
        })
    }

    /// Scales a recipe to `kg` kilograms of finished product.
    ///
    /// Pure read; lines come back ordered by ingredient name ascending with
    /// grams rounded to two decimals.
    pub fn calculate_recipe(&self, id: RecipeId, kg: f64) -> Result<ScaledRecipe, StoreError> {
        // `!(kg > 0.0)` also rejects NaN.
        if !(kg > 0.0) {
            return Err(StoreError::Validation(MSG_KG_NOT_POSITIVE.into()));
        }

        let recipe: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM recipes WHERE id = ?1",
                params![id.0],
                |row| row.get(0),
            )
            .optional()?;
        let recipe = recipe.ok_or_else(|| StoreError::NotFound(MSG_RECIPE_NOT_FOUND.into()))?;

        let mut stmt = self.conn.prepare(
            "SELECT i.name, ri.grams_per_kg \
             FROM recipe_ingredients ri \
             JOIN ingredients i ON i.id = ri.ingredient_id \
             WHERE ri.recipe_id = ?1 \
             ORDER BY i.name ASC",
        )?;
        let result = stmt
            .query_map(params![id.0], |row| {
                let grams_per_kg: f64 = row.get(1)?;
                Ok(ScaledIngredient {
                    ingredient: row.get(0)?,
                    grams: round_to_grams(grams_per_kg * kg),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScaledRecipe {
            recipe,
            kg,
            result,
        })
    }

    /// Lists all ingredients with the recipes referencing each one.
    ///
    /// The outer sequence follows `order`; each `present_in` list is always
    /// ascending by recipe name.
    pub fn list_ingredients(&self, order: SortOrder) -> Result<Vec<IngredientDetail>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, name FROM ingredients ORDER BY name {}",
            order.sql()
        ))?;
        let ingredients = stmt
            .query_map([], |row| {
                Ok((IngredientId(row.get(0)?), row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut recipes_stmt = self.conn.prepare(
            "SELECT r.name \
             FROM recipe_ingredients ri \
             JOIN recipes r ON r.id = ri.recipe_id \
             WHERE ri.ingredient_id = ?1 \
             ORDER BY r.name ASC",
        )?;

        let mut details = Vec::with_capacity(ingredients.len());
        for (id, name) in ingredients {
            let present_in = recipes_stmt
                .query_map(params![id.0], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            details.push(IngredientDetail {
                id,
                name,
                present_in,
            });
        }
        Ok(details)
    }

    /// Creates a catalog ingredient from a trimmed, non-empty name.
    pub fn create_ingredient(&mut self, name: &str) -> Result<Ingredient, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(MSG_INGREDIENT_NAME_REQUIRED.into()));
        }

        match self
            .conn
            .execute("INSERT INTO ingredients (name) VALUES (?1)", params![name])
        {
            Err(e) if is_unique_violation(&e) => {
                Err(StoreError::Conflict(MSG_INGREDIENT_EXISTS.into()))
            }
            Err(e) => Err(e.into()),
            Ok(_) => Ok(Ingredient {
                id: IngredientId(self.conn.last_insert_rowid()),
                name: name.to_string(),
            }),
        }
    }

    /// Deletes an unreferenced ingredient.
    ///
    /// Fails with [`StoreError::InUse`] while any recipe references it, and
    /// with [`StoreError::NotFound`] if the id does not exist.
    pub fn delete_ingredient(&mut self, id: IngredientId) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        let references: i64 = tx.query_row(
            "SELECT COUNT(*) FROM recipe_ingredients WHERE ingredient_id = ?1",
            params![id.0],
            |row| row.get(0),
        )?;
        if references > 0 {
            return Err(StoreError::InUse(MSG_INGREDIENT_IN_USE.into()));
        }

        let deleted = tx.execute("DELETE FROM ingredients WHERE id = ?1", params![id.0])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(MSG_INGREDIENT_NOT_FOUND.into()));
        }

        tx.commit()?;
        Ok(())
    }
}

/// Rounds a mass to two decimal places.
fn round_to_grams(grams: f64) -> f64 {
    (grams * 100.0).round() / 100.0
}

/// Whether a rusqlite error is a UNIQUE constraint violation.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
