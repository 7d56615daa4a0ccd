use super::schema::{Edition, TABLES};

pub static EXTENSIONS: &[&str] = &["uuid-ossp", "pg_trgm", "unaccent", "btree_gin"];

#[derive(Debug)]
pub struct Routine {
    pub name: &'static str,
    pub basic: bool,
    pub ddl: &'static str,
}

impl Routine {
    pub fn included_in(&self, edition: Edition) -> bool {
        match edition {
            Edition::Basic => self.basic,
            Edition::Full => true,
        }
    }
}

/// Functions the triggers call. Created before the tables.
pub static TRIGGER_FUNCTIONS: &[Routine] = &[
    Routine {
        name: "update_modified_column",
        basic: true,
        ddl: r#"
CREATE OR REPLACE FUNCTION {schema}.update_modified_column()
RETURNS TRIGGER AS $func$
BEGIN
    NEW.updated_at = CURRENT_TIMESTAMP;
    RETURN NEW;
END;
$func$ LANGUAGE plpgsql"#,
    },
    Routine {
        name: "refresh_recipe_search_vector",
        basic: false,
        ddl: r#"
CREATE OR REPLACE FUNCTION {schema}.refresh_recipe_search_vector()
RETURNS TRIGGER AS $func$
BEGIN
    NEW.search_vector =
        setweight(to_tsvector('turkish', COALESCE(NEW.title, '')), 'A') ||
        setweight(to_tsvector('turkish', COALESCE(NEW.description, '')), 'B');
    RETURN NEW;
END;
$func$ LANGUAGE plpgsql"#,
    },
    Routine {
        name: "refresh_recipe_rating",
        basic: false,
        ddl: r#"
CREATE OR REPLACE FUNCTION {schema}.refresh_recipe_rating()
RETURNS TRIGGER AS $func$
DECLARE
    affected UUID[];
BEGIN
    IF TG_OP = 'INSERT' THEN
        affected := ARRAY[NEW.recipe_id];
    ELSIF TG_OP = 'DELETE' THEN
        affected := ARRAY[OLD.recipe_id];
    ELSE
        affected := ARRAY[NEW.recipe_id, OLD.recipe_id];
    END IF;

    UPDATE {schema}.recipes r
    SET average_rating = COALESCE(stats.avg_rating, 0),
        rating_count = stats.total
    FROM (
        SELECT ids.id, ROUND(AVG(rr.rating), 2) AS avg_rating, COUNT(rr.id)::INTEGER AS total
        FROM (SELECT DISTINCT unnest(affected) AS id) ids
        LEFT JOIN {schema}.recipe_ratings rr ON rr.recipe_id = ids.id
        GROUP BY ids.id
    ) stats
    WHERE r.id = stats.id;

    RETURN NULL;
END;
$func$ LANGUAGE plpgsql"#,
    },
];

/// Query functions. SQL bodies are validated on creation, so these go
/// after the tables they read.
pub static SEARCH_FUNCTIONS: &[Routine] = &[
    Routine {
        name: "search_recipes",
        basic: false,
        ddl: r#"
CREATE OR REPLACE FUNCTION {schema}.search_recipes(
    search_term TEXT,
    language_code VARCHAR(5) DEFAULT 'tr',
    difficulty_filter SMALLINT DEFAULT NULL,
    cooking_time_max INTEGER DEFAULT NULL,
    premium_only BOOLEAN DEFAULT FALSE
)
RETURNS TABLE(
    recipe_id UUID,
    title VARCHAR(100),
    description TEXT,
    cooking_time_minutes INTEGER,
    difficulty_level SMALLINT,
    average_rating DECIMAL(3,2),
    is_premium BOOLEAN,
    rank REAL
) AS $$
    SELECT
        r.id,
        rt.title,
        rt.description,
        r.cooking_time_minutes,
        r.difficulty_level,
        r.average_rating,
        r.is_premium,
        COALESCE(ts_rank(rt.search_vector, plainto_tsquery('turkish', search_recipes.search_term)), 0) AS rank
    FROM {schema}.recipes r
    JOIN {schema}.recipe_translations rt ON r.id = rt.recipe_id
    WHERE rt.language_code = search_recipes.language_code
    AND r.is_published = true
    AND (search_recipes.difficulty_filter IS NULL OR r.difficulty_level = search_recipes.difficulty_filter)
    AND (search_recipes.cooking_time_max IS NULL OR r.cooking_time_minutes <= search_recipes.cooking_time_max)
    AND (NOT search_recipes.premium_only OR r.is_premium = search_recipes.premium_only)
    AND (rt.search_vector @@ plainto_tsquery('turkish', search_recipes.search_term)
         OR rt.title ILIKE '%' || search_recipes.search_term || '%'
         OR rt.description ILIKE '%' || search_recipes.search_term || '%')
    ORDER BY rank DESC, r.average_rating DESC
$$ LANGUAGE sql STABLE"#,
    },
    Routine {
        name: "match_recipes_by_ingredients",
        basic: false,
        ddl: r#"
CREATE OR REPLACE FUNCTION {schema}.match_recipes_by_ingredients(
    user_ingredient_ids UUID[],
    language_code VARCHAR(5) DEFAULT 'tr',
    min_match_percentage DECIMAL DEFAULT 0.5
)
RETURNS TABLE(
    recipe_id UUID,
    title VARCHAR(100),
    match_percentage DECIMAL,
    matched_ingredients INTEGER,
    total_ingredients INTEGER,
    missing_ingredients TEXT[]
) AS $$
    WITH required AS (
        SELECT
            ri.recipe_id,
            array_agg(ri.ingredient_id) AS ingredient_ids,
            count(*)::INTEGER AS total_count
        FROM {schema}.recipe_ingredients ri
        WHERE ri.is_required = true
        GROUP BY ri.recipe_id
    ),
    matches AS (
        SELECT
            req.recipe_id,
            req.total_count,
            (
                SELECT count(*)::INTEGER
                FROM unnest(req.ingredient_ids) AS ing_id
                WHERE ing_id = ANY(COALESCE(match_recipes_by_ingredients.user_ingredient_ids, ARRAY[]::UUID[]))
            ) AS matched_count,
            (
                SELECT array_agg(DISTINCT it.name::TEXT)
                FROM unnest(req.ingredient_ids) AS missing_id
                JOIN {schema}.ingredient_translations it ON it.ingredient_id = missing_id
                WHERE missing_id <> ALL(COALESCE(match_recipes_by_ingredients.user_ingredient_ids, ARRAY[]::UUID[]))
                AND it.language_code = match_recipes_by_ingredients.language_code
            ) AS missing_names
        FROM required req
    )
    SELECT
        m.recipe_id,
        rt.title,
        ROUND((m.matched_count::DECIMAL / m.total_count) * 100, 2) AS match_percentage,
        m.matched_count,
        m.total_count,
        COALESCE(m.missing_names, ARRAY[]::TEXT[])
    FROM matches m
    JOIN {schema}.recipe_translations rt ON rt.recipe_id = m.recipe_id
    WHERE rt.language_code = match_recipes_by_ingredients.language_code
    AND (m.matched_count::DECIMAL / m.total_count) >= match_recipes_by_ingredients.min_match_percentage
    ORDER BY match_percentage DESC, m.matched_count DESC
$$ LANGUAGE sql STABLE"#,
    },
];

#[derive(Debug)]
pub struct View {
    pub name: &'static str,
    pub ddl: &'static str,
}

/// Views read full-edition tables only.
pub static VIEWS: &[View] = &[
    View {
        name: "active_premium_users",
        ddl: r#"
CREATE OR REPLACE VIEW {schema}.active_premium_users AS
SELECT DISTINCT u.id, u.username, u.email, u.preferred_language, us.end_date
FROM {schema}.users u
JOIN {schema}.user_subscriptions us ON u.id = us.user_id
JOIN {schema}.subscription_plans sp ON us.plan_id = sp.id
WHERE us.end_date > CURRENT_TIMESTAMP
AND us.payment_status = 'completed'
AND u.is_active = true
AND sp.price > 0"#,
    },
    View {
        name: "popular_recipes",
        ddl: r#"
CREATE OR REPLACE VIEW {schema}.popular_recipes AS
SELECT
    r.id,
    rt.title,
    r.average_rating,
    r.rating_count,
    r.view_count,
    r.cooking_time_minutes,
    r.difficulty_level,
    r.is_premium,
    r.created_at
FROM {schema}.recipes r
JOIN {schema}.recipe_translations rt ON r.id = rt.recipe_id
WHERE r.is_published = true
AND rt.language_code = 'tr'
AND r.average_rating >= 4.0
AND r.rating_count >= 5
ORDER BY (r.average_rating * LOG(r.rating_count + 1) + r.view_count * 0.1) DESC"#,
    },
];

pub fn views(edition: Edition) -> &'static [View] {
    match edition {
        Edition::Basic => &[],
        Edition::Full => VIEWS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub name: String,
    pub table: &'static str,
    pub ddl: String,
}

/// Triggers for every included table: the `updated_at` maintenance ones
/// first, then the search vector and rating refresh triggers.
pub fn triggers(edition: Edition) -> Vec<Trigger> {
    let mut triggers: Vec<Trigger> = edition
        .tables()
        .filter(|table| table.tracks_updates)
        .map(|table| Trigger {
            name: format!("update_{}_modtime", table.name),
            table: table.name,
            ddl: format!(
                "CREATE TRIGGER update_{table}_modtime BEFORE UPDATE ON {{schema}}.{table} \
                 FOR EACH ROW EXECUTE FUNCTION {{schema}}.update_modified_column()",
                table = table.name
            ),
        })
        .collect();

    if edition.includes_table("recipe_translations") {
        triggers.push(Trigger {
            name: "refresh_recipe_translations_search_vector".to_string(),
            table: "recipe_translations",
            ddl: "CREATE TRIGGER refresh_recipe_translations_search_vector \
                  BEFORE INSERT OR UPDATE OF title, description ON {schema}.recipe_translations \
                  FOR EACH ROW EXECUTE FUNCTION {schema}.refresh_recipe_search_vector()"
                .to_string(),
        });
    }

    if edition.includes_table("recipe_ratings") {
        triggers.push(Trigger {
            name: "refresh_recipes_rating".to_string(),
            table: "recipe_ratings",
            ddl: "CREATE TRIGGER refresh_recipes_rating \
                  AFTER INSERT OR UPDATE OR DELETE ON {schema}.recipe_ratings \
                  FOR EACH ROW EXECUTE FUNCTION {schema}.refresh_recipe_rating()"
                .to_string(),
        });
    }

    triggers
}

/// Count of modtime triggers the edition gets, for reports and tests.
pub fn modtime_trigger_count(edition: Edition) -> usize {
    TABLES
        .iter()
        .filter(|table| edition.includes(table) && table.tracks_updates)
        .count()
}
