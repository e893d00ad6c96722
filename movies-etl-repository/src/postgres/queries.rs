//! SQL queries against the `movies` schema.
//!
//! Change queries take `$1` = since (nullable, exclusive), `$2` = offset and
//! `$3` = limit. Fetch queries take `$1` = array of ids.

pub const SELECT_MODIFIED_GENRES: &str = r#"
SELECT id
  FROM movies_genre
 WHERE ($1::timestamptz IS NULL OR modified > $1)
 ORDER BY modified ASC
OFFSET $2
 LIMIT $3
"#;

pub const SELECT_MODIFIED_PERSONS: &str = r#"
SELECT id
  FROM movies_person
 WHERE ($1::timestamptz IS NULL OR modified > $1)
 ORDER BY modified ASC
OFFSET $2
 LIMIT $3
"#;

pub const SELECT_MODIFIED_FILMWORKS: &str = r#"
SELECT id
  FROM movies_filmwork
 WHERE ($1::timestamptz IS NULL OR modified > $1)
 ORDER BY modified ASC
OFFSET $2
 LIMIT $3
"#;

pub const SELECT_MODIFIED_FILMWORKS_FROM_GENRES: &str = r#"
SELECT fw_g.filmwork_id
  FROM movies_genre g
  JOIN movies_filmwork_genres fw_g
    ON g.id = fw_g.genre_id
 WHERE ($1::timestamptz IS NULL OR g.modified > $1)
 ORDER BY g.modified ASC
OFFSET $2
 LIMIT $3
"#;

pub const SELECT_MODIFIED_FILMWORKS_FROM_PERSONS: &str = r#"
SELECT fw_p.filmwork_id
  FROM movies_person p
  JOIN movies_filmwork_participants fw_p
    ON p.id = fw_p.person_id
 WHERE ($1::timestamptz IS NULL OR p.modified > $1)
 ORDER BY p.modified ASC
OFFSET $2
 LIMIT $3
"#;

pub const SELECT_GENRES: &str = r#"
SELECT id,
       name
  FROM movies_genre
 WHERE id = ANY($1)
"#;

pub const SELECT_PERSONS: &str = r#"
SELECT id,
       first_name,
       last_name
  FROM movies_person
 WHERE id = ANY($1)
"#;

pub const SELECT_FILMWORKS: &str = r#"
SELECT id,
       filmwork_type,
       title,
       description,
       rating
  FROM movies_filmwork
 WHERE id = ANY($1)
 ORDER BY modified ASC
"#;

pub const SELECT_FILMWORKS_PARTICIPANTS: &str = r#"
SELECT fw_p.filmwork_id,
       p.id,
       p.first_name,
       p.last_name,
       fw_p.role
  FROM movies_person p
  JOIN movies_filmwork_participants fw_p
    ON p.id = fw_p.person_id
 WHERE fw_p.filmwork_id = ANY($1)
"#;

pub const SELECT_FILMWORKS_GENRES: &str = r#"
SELECT fw_g.filmwork_id,
       g.id,
       g.name
  FROM movies_genre g
  JOIN movies_filmwork_genres fw_g
    ON g.id = fw_g.genre_id
 WHERE fw_g.filmwork_id = ANY($1)
"#;
