//! SQL statements for the message table.

use crate::TableConfig;

/// The statements a [`TableMessageProvider`](crate::TableMessageProvider)
/// runs, rendered once from a [`TableConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    /// `SELECT DISTINCT basename FROM table`
    pub select_basenames: String,
    /// Locale parts, key and text of one basename
    pub select_messages: String,
    /// Remove every row of one basename
    pub delete_basename: String,
    /// Insert one row, all six columns bound
    pub insert_message: String,
    /// `CREATE TABLE IF NOT EXISTS` for the configured layout
    pub create_table: String,
}

impl Statements {
    /// Render every statement for `config`.
    ///
    /// The configuration is expected to have passed
    /// [`TableConfig::validate`].
    pub fn new(config: &TableConfig) -> Self {
        let table = config.quote(&config.table_name);
        let basename = config.quote(&config.basename_column);
        let language = config.quote(&config.language_column);
        let country = config.quote(&config.country_column);
        let variant = config.quote(&config.variant_column);
        let key = config.quote(&config.key_column);
        let message = config.quote(&config.message_column);
        let p = |i| config.placeholders.placeholder(i);

        let select_basenames = format!("SELECT DISTINCT {basename} FROM {table} ORDER BY {basename}");

        let select_messages = format!(
            "SELECT {language}, {country}, {variant}, {key}, {message} FROM {table} WHERE {basename} = {}",
            p(1)
        );

        let delete_basename = format!("DELETE FROM {table} WHERE {basename} = {}", p(1));

        let insert_message = format!(
            "INSERT INTO {table} ({basename}, {language}, {country}, {variant}, {key}, {message}) \
             VALUES ({}, {}, {}, {}, {}, {})",
            p(1),
            p(2),
            p(3),
            p(4),
            p(5),
            p(6)
        );

        let create_table = format!(
            "CREATE TABLE IF NOT EXISTS {table} (\
             {basename} VARCHAR(255) NOT NULL, \
             {language} VARCHAR(16), \
             {country} VARCHAR(16), \
             {variant} VARCHAR(64), \
             {key} VARCHAR(255) NOT NULL, \
             {message} TEXT)"
        );

        Self {
            select_basenames,
            select_messages,
            delete_basename,
            insert_message,
            create_table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlaceholderStyle;

    #[test]
    fn test_default_statements() {
        let statements = Statements::new(&TableConfig::default());
        assert_eq!(
            statements.select_basenames,
            "SELECT DISTINCT `basename` FROM `Message` ORDER BY `basename`"
        );
        assert_eq!(
            statements.select_messages,
            "SELECT `language`, `country`, `variant`, `key`, `message` FROM `Message` WHERE `basename` = ?"
        );
        assert_eq!(statements.delete_basename, "DELETE FROM `Message` WHERE `basename` = ?");
        assert!(statements.insert_message.ends_with("VALUES (?, ?, ?, ?, ?, ?)"));
    }

    #[test]
    fn test_unquoted_dollar_statements() {
        let config = TableConfig::new()
            .table_name("texts")
            .key_column("code")
            .delimiter("")
            .placeholders(PlaceholderStyle::Dollar);
        let statements = Statements::new(&config);
        assert_eq!(statements.delete_basename, "DELETE FROM texts WHERE basename = $1");
        assert_eq!(
            statements.insert_message,
            "INSERT INTO texts (basename, language, country, variant, code, message) \
             VALUES ($1, $2, $3, $4, $5, $6)"
        );
        assert!(statements.create_table.starts_with("CREATE TABLE IF NOT EXISTS texts ("));
    }
}
