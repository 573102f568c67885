use crate::menu_cycle::{CycleDay, MenuCycle, Weekday};
use crate::nutrition::{self, NutritionSummary};
use crate::recipe_model::{
    CalendarEvent, IngredientLine, NutrientCoefficients, NutrientStatus, Recipe, Unit,
};
use crate::seasonality::{parse_months, IngredientKind, SeasonalIngredient};
use crate::technical_sheet::{SheetInput, TechnicalSheet};
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored menu cycle with its row id
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCycle {
    pub id: i64,
    pub cycle: MenuCycle,
}

/// A stored calendar event; `sheet_id` is set when its recipe was persisted
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub sheet_id: Option<i64>,
}

/// Initialize the database schema
pub fn init_database_schema(conn: &Connection) -> Result<()> {
    info!("Initializing database schema...");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS technical_sheets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            code TEXT NOT NULL,
            meal_type TEXT NOT NULL,
            category TEXT NOT NULL,
            steps TEXT NOT NULL,
            energy REAL NOT NULL,
            protein REAL NOT NULL,
            fat REAL NOT NULL,
            carbs REAL NOT NULL,
            cost REAL NOT NULL,
            portions TEXT NOT NULL,
            scraped INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .context("Failed to create technical_sheets table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sheet_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            quantity REAL NOT NULL,
            unit TEXT NOT NULL,
            energy_per_unit REAL NOT NULL,
            protein_per_unit REAL NOT NULL,
            fat_per_unit REAL NOT NULL,
            carbs_per_unit REAL NOT NULL,
            cost_per_unit REAL NOT NULL,
            nutrients_resolved INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (sheet_id) REFERENCES technical_sheets(id)
        )",
        [],
    )
    .context("Failed to create ingredients table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS menu_cycles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            meal_type TEXT NOT NULL,
            week INTEGER NOT NULL,
            start_date TEXT NOT NULL,
            duration_weeks INTEGER NOT NULL DEFAULT 1
        )",
        [],
    )
    .context("Failed to create menu_cycles table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS cycle_days (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            cycle_id INTEGER NOT NULL,
            day TEXT NOT NULL,
            sheet_id INTEGER NOT NULL,
            portions INTEGER NOT NULL,
            FOREIGN KEY (cycle_id) REFERENCES menu_cycles(id),
            FOREIGN KEY (sheet_id) REFERENCES technical_sheets(id)
        )",
        [],
    )
    .context("Failed to create cycle_days table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS seasonality (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ingredient TEXT NOT NULL,
            type TEXT NOT NULL,
            months TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create seasonality table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS efemerides (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            date TEXT NOT NULL,
            sheet_id INTEGER,
            FOREIGN KEY (sheet_id) REFERENCES technical_sheets(id)
        )",
        [],
    )
    .context("Failed to create efemerides table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

fn insert_sheet_row(
    conn: &Connection,
    sheet: (&str, &str, &str, &str, &str),
    nutrition: &NutritionSummary,
    portions: &str,
    scraped: bool,
) -> Result<i64> {
    let (name, code, meal_type, category, steps) = sheet;
    conn.execute(
        "INSERT INTO technical_sheets
            (name, code, meal_type, category, steps, energy, protein, fat, carbs, cost, portions, scraped)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            name,
            code,
            meal_type,
            category,
            steps,
            nutrition.energy,
            nutrition.protein,
            nutrition.fat,
            nutrition.carbs,
            nutrition.cost,
            portions,
            scraped
        ],
    )
    .context("Failed to insert technical sheet")?;
    Ok(conn.last_insert_rowid())
}

/// Store a scraped recipe, replacing a previously scraped sheet with the same code.
///
/// Sheets created by hand are never replaced. A replaced sheet keeps its id and
/// loses its ingredient rows. Nutrition is resolved from the recipe's current
/// ingredients.
pub fn insert_or_replace_recipe(conn: &Connection, recipe: &Recipe) -> Result<i64> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM technical_sheets WHERE code = ?1 AND scraped = 1 ORDER BY id LIMIT 1",
            params![recipe.code],
            |row| row.get(0),
        )
        .optional()
        .context("Failed to look up sheet by code")?;

    let steps = recipe.steps_text();
    let nutrition = &nutrition::resolve(&recipe.ingredients, &recipe.meal_type);

    match existing {
        Some(sheet_id) => {
            debug!("Replacing sheet {} for recipe code {}", sheet_id, recipe.code);
            conn.execute(
                "DELETE FROM ingredients WHERE sheet_id = ?1",
                params![sheet_id],
            )
            .context("Failed to delete replaced ingredients")?;
            conn.execute(
                "UPDATE technical_sheets SET name = ?1, meal_type = ?2, category = ?3, steps = ?4,
                    energy = ?5, protein = ?6, fat = ?7, carbs = ?8, cost = ?9, portions = ?10
                 WHERE id = ?11",
                params![
                    recipe.name,
                    recipe.meal_type,
                    recipe.category,
                    steps,
                    nutrition.energy,
                    nutrition.protein,
                    nutrition.fat,
                    nutrition.carbs,
                    nutrition.cost,
                    recipe.portions,
                    sheet_id
                ],
            )
            .context("Failed to replace technical sheet")?;
            Ok(sheet_id)
        }
        None => insert_sheet_row(
            conn,
            (
                &recipe.name,
                &recipe.code,
                &recipe.meal_type,
                &recipe.category,
                &steps,
            ),
            nutrition,
            &recipe.portions,
            true,
        ),
    }
}

/// Store one ingredient line of a sheet
pub fn insert_ingredient(conn: &Connection, sheet_id: i64, line: &IngredientLine) -> Result<i64> {
    let c = &line.coefficients;
    conn.execute(
        "INSERT INTO ingredients
            (sheet_id, name, quantity, unit, energy_per_unit, protein_per_unit,
             fat_per_unit, carbs_per_unit, cost_per_unit, nutrients_resolved)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            sheet_id,
            line.name,
            line.quantity,
            line.unit.as_str(),
            c.energy,
            c.protein,
            c.fat,
            c.carbs,
            c.cost,
            line.is_resolved()
        ],
    )
    .with_context(|| format!("Failed to insert ingredient '{}'", line.name))?;
    Ok(conn.last_insert_rowid())
}

/// Persist recipes in order, one transaction per recipe; returns the sheet ids
pub fn save_recipes(conn: &mut Connection, recipes: &[Recipe]) -> Result<Vec<i64>> {
    info!("Saving {} recipes", recipes.len());

    let mut ids = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        let tx = conn
            .transaction()
            .context("Failed to begin recipe transaction")?;
        let sheet_id = insert_or_replace_recipe(&tx, recipe)?;
        for line in &recipe.ingredients {
            insert_ingredient(&tx, sheet_id, line)?;
        }
        tx.commit()
            .with_context(|| format!("Failed to commit recipe {}", recipe.code))?;
        debug!("Saved recipe {} as sheet {}", recipe.code, sheet_id);
        ids.push(sheet_id);
    }

    info!("Saved {} recipes", ids.len());
    Ok(ids)
}

/// Persist calendar events, linking each to the sheet its 1-based ordinal points at
pub fn save_calendar_events(
    conn: &Connection,
    events: &[CalendarEvent],
    sheet_ids: &[i64],
) -> Result<Vec<i64>> {
    info!("Saving {} calendar events", events.len());

    let mut ids = Vec::with_capacity(events.len());
    for event in events {
        let sheet_id = event
            .recipe_ordinal
            .checked_sub(1)
            .and_then(|index| sheet_ids.get(index))
            .copied();
        conn.execute(
            "INSERT INTO efemerides (name, date, sheet_id) VALUES (?1, ?2, ?3)",
            params![event.name, event.date, sheet_id],
        )
        .with_context(|| format!("Failed to insert calendar event '{}'", event.name))?;
        ids.push(conn.last_insert_rowid());
    }
    Ok(ids)
}

pub fn list_calendar_events(conn: &Connection) -> Result<Vec<StoredEvent>> {
    let mut stmt = conn
        .prepare("SELECT id, name, date, sheet_id FROM efemerides ORDER BY id")
        .context("Failed to prepare calendar event query")?;
    let events = stmt
        .query_map([], |row| {
            Ok(StoredEvent {
                id: row.get(0)?,
                name: row.get(1)?,
                date: row.get(2)?,
                sheet_id: row.get(3)?,
            })
        })
        .context("Failed to query calendar events")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read calendar events")?;
    Ok(events)
}

/// Create a sheet from validated manual input
pub fn create_sheet(conn: &mut Connection, input: SheetInput) -> Result<i64> {
    let input = input.validated()?;
    info!("Creating technical sheet '{}'", input.name);

    let tx = conn.transaction().context("Failed to begin sheet transaction")?;
    let sheet_id = insert_sheet_row(
        &tx,
        (
            &input.name,
            &input.code,
            &input.meal_type,
            &input.category,
            &input.steps,
        ),
        &input.nutrition(),
        &input.portions_descriptor(),
        false,
    )?;
    for line in &input.ingredients {
        insert_ingredient(&tx, sheet_id, line)?;
    }
    tx.commit().context("Failed to commit technical sheet")?;

    info!("Technical sheet created with ID: {}", sheet_id);
    Ok(sheet_id)
}

/// Replace a sheet and its ingredients; returns false when the sheet does not exist
pub fn update_sheet(conn: &mut Connection, sheet_id: i64, input: SheetInput) -> Result<bool> {
    let input = input.validated()?;
    info!("Updating technical sheet with ID: {}", sheet_id);

    let nutrition = input.nutrition();
    let tx = conn.transaction().context("Failed to begin sheet transaction")?;
    let rows_affected = tx
        .execute(
            "UPDATE technical_sheets SET name = ?1, code = ?2, meal_type = ?3, category = ?4,
                steps = ?5, energy = ?6, protein = ?7, fat = ?8, carbs = ?9, cost = ?10, portions = ?11
             WHERE id = ?12",
            params![
                input.name,
                input.code,
                input.meal_type,
                input.category,
                input.steps,
                nutrition.energy,
                nutrition.protein,
                nutrition.fat,
                nutrition.carbs,
                nutrition.cost,
                input.portions_descriptor(),
                sheet_id
            ],
        )
        .context("Failed to update technical sheet")?;

    if rows_affected == 0 {
        info!("No technical sheet found with ID: {}", sheet_id);
        return Ok(false);
    }

    tx.execute(
        "DELETE FROM ingredients WHERE sheet_id = ?1",
        params![sheet_id],
    )
    .context("Failed to delete previous ingredients")?;
    for line in &input.ingredients {
        insert_ingredient(&tx, sheet_id, line)?;
    }
    tx.commit().context("Failed to commit sheet update")?;

    info!("Technical sheet updated successfully with ID: {}", sheet_id);
    Ok(true)
}

/// Delete a sheet after its ingredients
pub fn delete_sheet(conn: &mut Connection, sheet_id: i64) -> Result<bool> {
    info!("Deleting technical sheet with ID: {}", sheet_id);

    let tx = conn.transaction().context("Failed to begin delete transaction")?;
    tx.execute(
        "DELETE FROM ingredients WHERE sheet_id = ?1",
        params![sheet_id],
    )
    .context("Failed to delete sheet ingredients")?;
    let rows_affected = tx
        .execute(
            "DELETE FROM technical_sheets WHERE id = ?1",
            params![sheet_id],
        )
        .context("Failed to delete technical sheet")?;
    tx.commit().context("Failed to commit sheet deletion")?;

    if rows_affected > 0 {
        info!("Technical sheet deleted successfully with ID: {}", sheet_id);
        Ok(true)
    } else {
        info!("No technical sheet found with ID: {}", sheet_id);
        Ok(false)
    }
}

const SHEET_COLUMNS: &str =
    "id, name, code, meal_type, category, steps, energy, protein, fat, carbs, cost, portions";

fn sheet_from_row(row: &Row<'_>) -> rusqlite::Result<TechnicalSheet> {
    Ok(TechnicalSheet {
        id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        meal_type: row.get(3)?,
        category: row.get(4)?,
        steps: row.get(5)?,
        nutrition: NutritionSummary {
            energy: row.get(6)?,
            protein: row.get(7)?,
            fat: row.get(8)?,
            carbs: row.get(9)?,
            cost: row.get(10)?,
        },
        portions: row.get(11)?,
    })
}

/// Read a sheet by ID
pub fn read_sheet(conn: &Connection, sheet_id: i64) -> Result<Option<TechnicalSheet>> {
    let query = format!("SELECT {} FROM technical_sheets WHERE id = ?1", SHEET_COLUMNS);
    conn.query_row(&query, params![sheet_id], sheet_from_row)
        .optional()
        .context("Failed to read technical sheet")
}

/// All sheets ordered by id
pub fn list_sheets(conn: &Connection) -> Result<Vec<TechnicalSheet>> {
    let query = format!("SELECT {} FROM technical_sheets ORDER BY id", SHEET_COLUMNS);
    let mut stmt = conn
        .prepare(&query)
        .context("Failed to prepare sheet listing")?;
    let sheets = stmt
        .query_map([], sheet_from_row)
        .context("Failed to query technical sheets")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read technical sheets")?;
    Ok(sheets)
}

/// Ingredient lines of a sheet in insertion order
pub fn sheet_ingredients(conn: &Connection, sheet_id: i64) -> Result<Vec<IngredientLine>> {
    let mut stmt = conn
        .prepare(
            "SELECT name, quantity, unit, energy_per_unit, protein_per_unit, fat_per_unit,
                    carbs_per_unit, cost_per_unit, nutrients_resolved
             FROM ingredients WHERE sheet_id = ?1 ORDER BY id",
        )
        .context("Failed to prepare ingredient query")?;

    let rows = stmt
        .query_map(params![sheet_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, String>(2)?,
                NutrientCoefficients {
                    energy: row.get(3)?,
                    protein: row.get(4)?,
                    fat: row.get(5)?,
                    carbs: row.get(6)?,
                    cost: row.get(7)?,
                },
                row.get::<_, bool>(8)?,
            ))
        })
        .context("Failed to query ingredients")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read ingredients")?;

    rows.into_iter()
        .map(|(name, quantity, unit, coefficients, resolved)| {
            let unit = unit
                .parse::<Unit>()
                .with_context(|| format!("Stored ingredient '{}' has a bad unit", name))?;
            Ok(IngredientLine {
                name,
                quantity,
                unit,
                coefficients,
                status: if resolved {
                    NutrientStatus::Resolved
                } else {
                    NutrientStatus::Unresolved
                },
            })
        })
        .collect()
}

/// Store a validated menu cycle with its days
pub fn create_menu_cycle(conn: &mut Connection, cycle: MenuCycle) -> Result<i64> {
    let cycle = cycle.validated()?;
    info!("Creating menu cycle '{}'", cycle.name);

    let tx = conn.transaction().context("Failed to begin cycle transaction")?;
    tx.execute(
        "INSERT INTO menu_cycles (name, meal_type, week, start_date, duration_weeks)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            cycle.name,
            cycle.meal_type,
            cycle.week,
            cycle.start_date.format(DATE_FORMAT).to_string(),
            cycle.duration_weeks
        ],
    )
    .context("Failed to insert menu cycle")?;
    let cycle_id = tx.last_insert_rowid();

    for day in &cycle.days {
        tx.execute(
            "INSERT INTO cycle_days (cycle_id, day, sheet_id, portions) VALUES (?1, ?2, ?3, ?4)",
            params![cycle_id, day.day.as_str(), day.sheet_id, day.portions],
        )
        .with_context(|| format!("Failed to insert cycle day {}", day.day))?;
    }
    tx.commit().context("Failed to commit menu cycle")?;

    info!("Menu cycle created with ID: {}", cycle_id);
    Ok(cycle_id)
}

/// Days of a stored cycle, Monday first
pub fn cycle_days(conn: &Connection, cycle_id: i64) -> Result<Vec<CycleDay>> {
    let mut stmt = conn
        .prepare("SELECT day, sheet_id, portions FROM cycle_days WHERE cycle_id = ?1")
        .context("Failed to prepare cycle day query")?;
    let rows = stmt
        .query_map(params![cycle_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, u32>(2)?,
            ))
        })
        .context("Failed to query cycle days")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read cycle days")?;

    let mut days = rows
        .into_iter()
        .map(|(day, sheet_id, portions)| {
            Ok(CycleDay {
                day: day.parse::<Weekday>()?,
                sheet_id,
                portions,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    days.sort_by_key(|d| d.day);
    Ok(days)
}

pub fn list_menu_cycles(conn: &Connection) -> Result<Vec<StoredCycle>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, meal_type, week, start_date, duration_weeks
             FROM menu_cycles ORDER BY id",
        )
        .context("Failed to prepare menu cycle listing")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, u32>(5)?,
            ))
        })
        .context("Failed to query menu cycles")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read menu cycles")?;

    rows.into_iter()
        .map(|(id, name, meal_type, week, start_date, duration_weeks)| {
            let start_date = NaiveDate::parse_from_str(&start_date, DATE_FORMAT)
                .with_context(|| format!("Menu cycle {} has a bad start date", id))?;
            Ok(StoredCycle {
                id,
                cycle: MenuCycle {
                    name,
                    meal_type,
                    week,
                    start_date,
                    duration_weeks,
                    days: cycle_days(conn, id)?,
                },
            })
        })
        .collect()
}

pub fn add_seasonality(conn: &Connection, entry: &SeasonalIngredient) -> Result<i64> {
    info!("Adding seasonality for '{}'", entry.ingredient);
    conn.execute(
        "INSERT INTO seasonality (ingredient, type, months) VALUES (?1, ?2, ?3)",
        params![entry.ingredient, entry.kind.as_str(), entry.months_descriptor()],
    )
    .context("Failed to insert seasonality entry")?;
    Ok(conn.last_insert_rowid())
}

pub fn list_seasonality(conn: &Connection) -> Result<Vec<SeasonalIngredient>> {
    let mut stmt = conn
        .prepare("SELECT ingredient, type, months FROM seasonality ORDER BY id")
        .context("Failed to prepare seasonality query")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .context("Failed to query seasonality")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read seasonality")?;

    rows.into_iter()
        .map(|(ingredient, kind, months)| {
            let kind = kind
                .parse::<IngredientKind>()
                .map_err(|e| anyhow!("Seasonality entry '{}': {}", ingredient, e))?;
            Ok(SeasonalIngredient::new(&ingredient, kind, parse_months(&months)?)?)
        })
        .collect()
}
