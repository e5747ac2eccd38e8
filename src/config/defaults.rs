// src/config/defaults.rs
use crate::config::app::Layout;
use crate::consts::{DEFAULT_DATA_DIR, STORAGE_ID_PATTERN};

pub const CONFIG_ENV_VAR: &str = "VAULT_UPGRADE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "vault-upgrade.toml";

pub fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.into()
}

pub fn default_filename_pattern() -> String {
    STORAGE_ID_PATTERN.into()
}

pub fn default_layout() -> Layout {
    Layout {
        data_dir: default_data_dir(),
        filename_pattern: default_filename_pattern(),
    }
}

/// Built-in English text for every message key the crate emits
pub fn default_message(key: &str) -> Option<&'static str> {
    let text = match key {
        "upgrade.version4to5.msg" => {
            "Vault \"{vault}\" uses an outdated file format. Upgrading rewrites the size \
             information of every encrypted file. Make a backup before continuing."
        }
        "upgrade.version4to5.err.io" => {
            "Upgrading vault \"{vault}\" failed while reading or writing files. \
             Already converted files stay converted; you can retry the upgrade."
        }
        "upgrade.version4to5.err.crypto" => {
            "Upgrading vault \"{vault}\" failed: a file could not be decrypted. \
             The vault may be damaged or not in the expected format."
        }
        "upgrade.err.version_mismatch" => {
            "Vault \"{vault}\" is not in the format version this upgrade expects."
        }
        "upgrade.err.no_path" => "No upgrade is available for the format of vault \"{vault}\".",
        _ => return None,
    };
    Some(text)
}
