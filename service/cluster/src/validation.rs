//! Request validation, done before anything touches the platform.
use std::ops::RangeInclusive;

use anyhow::Context;
use domain_cluster::{
    command::CreateOrUpdateClusterCommand,
    exception::{ClusterException, ClusterResult},
    model::vo::PoolerMode,
};
use regex::Regex;

const NAME_PATTERN: &str = "^[a-zA-Z0-9-]+$";
/// System names become namespace and object names, so they must be RFC 1123 labels.
const SYSTEM_NAME_PATTERN: &str = "^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";
const MAX_NAME_LENGTH: usize = 31;

const NAME_RULE: &str = "can only contain letters, numbers, or hyphens";
const SYSTEM_NAME_RULE: &str =
    "can only contain lowercase letters, numbers, or hyphens, and must start and end with a letter or number";

pub(crate) const STORAGE_SIZE: RangeInclusive<u32> = 1..=5;
pub(crate) const CPU: RangeInclusive<u32> = 100..=800;
pub(crate) const MEMORY: RangeInclusive<u32> = 300..=1500;
pub(crate) const MAJOR_VERSION: RangeInclusive<u32> = 13..=17;
pub(crate) const INSTANCES: RangeInclusive<u32> = 1..=3;

fn check_name(
    pattern: &Regex,
    rule: &str,
    field: &str,
    value: &str,
    errors: &mut Vec<String>,
) {
    if value.is_empty() {
        errors.push(format!("{field} is required."));
    } else if !pattern.is_match(value) {
        errors.push(format!("{field} {rule}."));
    } else if value.len() > MAX_NAME_LENGTH {
        errors.push(format!(
            "{field} cannot exceed {MAX_NAME_LENGTH} characters."
        ));
    }
}

fn check_range(field: &str, range: &RangeInclusive<u32>, value: u32, errors: &mut Vec<String>) {
    if !range.contains(&value) {
        errors.push(format!(
            "{field} must be between {} and {}.",
            range.start(),
            range.end()
        ));
    }
}

/// Validate a cluster request, returning its parsed pooler mode.
pub(crate) fn validate_cluster_command(
    command: &CreateOrUpdateClusterCommand,
) -> ClusterResult<Option<PoolerMode>> {
    let pattern = Regex::new(NAME_PATTERN).context("invalid name pattern")?;
    let system_pattern =
        Regex::new(SYSTEM_NAME_PATTERN).context("invalid system name pattern")?;
    let mut errors = vec![];

    check_name(
        &system_pattern,
        SYSTEM_NAME_RULE,
        "SystemName",
        &command.system_name,
        &mut errors,
    );
    check_range("StorageSize", &STORAGE_SIZE, command.storage_size, &mut errors);
    check_range("Cpu", &CPU, command.cpu, &mut errors);
    check_range("Memory", &MEMORY, command.memory, &mut errors);
    check_range("MajorVersion", &MAJOR_VERSION, command.major_version, &mut errors);
    check_name(&pattern, NAME_RULE, "DatabaseName", &command.database_name, &mut errors);
    check_range("Instances", &INSTANCES, command.instances, &mut errors);
    check_name(&pattern, NAME_RULE, "OwnerName", &command.owner_name, &mut errors);

    let pooler_mode = match command.pooler_mode.as_deref() {
        None => None,
        Some(mode) => match mode.parse::<PoolerMode>() {
            Ok(mode) => Some(mode),
            Err(_) => {
                errors.push(format!(
                    "PoolerMode must be one of session, transaction or statement, not {mode}."
                ));
                None
            }
        },
    };

    if errors.is_empty() {
        Ok(pooler_mode)
    } else {
        Err(ClusterException::Validation {
            reason: errors.join("; "),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn command() -> CreateOrUpdateClusterCommand {
        CreateOrUpdateClusterCommand {
            system_name: "shop-db".to_owned(),
            security_group_id: None,
            storage_size: 2,
            cpu: 250,
            memory: 512,
            major_version: 16,
            database_name: "shop".to_owned(),
            lc_collate: "C".to_owned(),
            lc_ctype: "C".to_owned(),
            instances: 2,
            owner_name: "shop".to_owned(),
            owner_password: Some("hunter2".to_owned()),
            pooler_mode: Some("session".to_owned()),
            pooler_max_connections: Some(100),
            pooler_default_pool_size: Some(10),
            backup_schedule_cron_expression: None,
            backup_method: None,
        }
    }

    #[test]
    fn valid_command() {
        assert_eq!(
            validate_cluster_command(&command()).unwrap(),
            Some(PoolerMode::Session)
        );
    }

    #[test]
    fn every_violation_is_reported() {
        let mut command = command();
        command.system_name = "shop_db".to_owned();
        command.storage_size = 6;
        command.instances = 0;
        command.owner_name = "a".repeat(32);
        command.pooler_mode = Some("bogus".to_owned());

        let Err(ClusterException::Validation { reason }) = validate_cluster_command(&command)
        else {
            panic!("command should be rejected");
        };
        assert_eq!(
            reason,
            "SystemName can only contain lowercase letters, numbers, or hyphens, \
             and must start and end with a letter or number.; \
             StorageSize must be between 1 and 5.; \
             Instances must be between 1 and 3.; \
             OwnerName cannot exceed 31 characters.; \
             PoolerMode must be one of session, transaction or statement, not bogus."
        );
    }

    #[test]
    fn empty_name_is_required() {
        let mut command = command();
        command.database_name = String::new();
        let err = validate_cluster_command(&command).unwrap_err();
        assert!(err.to_string().contains("DatabaseName is required."));
    }

    #[test]
    fn system_name_must_be_a_dns_label() {
        for name in ["Shop-DB", "-shop", "shop-", "shop.db"] {
            let mut command = command();
            command.system_name = name.to_owned();
            let Err(ClusterException::Validation { reason }) = validate_cluster_command(&command)
            else {
                panic!("{name:?} should be rejected");
            };
            assert!(reason.starts_with("SystemName can only contain lowercase"), "{reason}");
        }

        for name in ["shop-db", "db1", "a"] {
            let mut command = command();
            command.system_name = name.to_owned();
            assert!(validate_cluster_command(&command).is_ok(), "{name:?}");
        }
    }

    #[test]
    fn database_name_may_use_uppercase() {
        let mut command = command();
        command.database_name = "Shop".to_owned();
        assert!(validate_cluster_command(&command).is_ok());
    }
}
