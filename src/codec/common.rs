// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Codecs for sub-objects shared between resource kinds.

use crate::attrs::Attributes;
use crate::error::Result;
use crate::types::common::{Access, InstanceAccessRule, Owner, TemplateRef};

/// Encode the `owner` block. Both user and team are encoded independently;
/// mutual exclusion is checked by the reconciler before any remote call.
pub fn encode_owner(attrs: &Attributes) -> Result<Option<Owner>> {
    let Some(block) = attrs.get_block("owner")? else {
        return Ok(None);
    };

    let owner = Owner {
        user: block.get_str("user")?.map(str::to_string),
        team: block.get_str("team")?.map(str::to_string),
    };

    if owner == Owner::default() {
        return Ok(None);
    }
    Ok(Some(owner))
}

pub fn decode_owner(owner: Option<&Owner>, attrs: &mut Attributes) {
    let Some(owner) = owner else { return };
    if *owner == Owner::default() {
        return;
    }

    let mut block = Attributes::new();
    if let Some(user) = &owner.user {
        block.set_str("user", user);
    }
    if let Some(team) = &owner.team {
        block.set_str("team", team);
    }
    attrs.set_block("owner", block);
}

pub fn encode_template_ref(attrs: &Attributes) -> Result<Option<TemplateRef>> {
    let Some(block) = attrs.get_block("template_ref")? else {
        return Ok(None);
    };

    let template_ref = TemplateRef {
        name: block.get_str("name")?.map(str::to_string),
        version: block.get_str("version")?.map(str::to_string),
    };

    if template_ref == TemplateRef::default() {
        return Ok(None);
    }
    Ok(Some(template_ref))
}

pub fn decode_template_ref(template_ref: Option<&TemplateRef>, attrs: &mut Attributes) {
    let Some(template_ref) = template_ref else { return };
    if *template_ref == TemplateRef::default() {
        return;
    }

    let mut block = Attributes::new();
    if let Some(name) = &template_ref.name {
        block.set_str("name", name);
    }
    if let Some(version) = &template_ref.version {
        block.set_str("version", version);
    }
    attrs.set_block("template_ref", block);
}

/// Encode the ordered `access` rule list. Rules are matched first-to-last,
/// so the block order is carried over verbatim.
pub fn encode_access(attrs: &Attributes) -> Result<Option<Vec<Access>>> {
    let Some(blocks) = attrs.get_blocks("access")? else {
        return Ok(None);
    };
    if blocks.is_empty() {
        return Ok(None);
    }

    let mut rules = Vec::with_capacity(blocks.len());
    for block in blocks {
        rules.push(Access {
            name: block.get_str("name")?.map(str::to_string),
            verbs: block.get_str_list("verbs")?.map(<[String]>::to_vec),
            subresources: block.get_str_list("subresources")?.map(<[String]>::to_vec),
            users: block.get_str_list("users")?.map(<[String]>::to_vec),
            teams: block.get_str_list("teams")?.map(<[String]>::to_vec),
        });
    }
    Ok(Some(rules))
}

pub fn decode_access(access: Option<&Vec<Access>>, attrs: &mut Attributes) {
    let Some(rules) = access else { return };
    if rules.is_empty() {
        return;
    }

    let mut blocks = Vec::with_capacity(rules.len());
    for rule in rules {
        let mut block = Attributes::new();
        if let Some(name) = &rule.name {
            block.set_str("name", name);
        }
        if let Some(verbs) = &rule.verbs {
            block.set_str_list("verbs", verbs.clone());
        }
        if let Some(subresources) = &rule.subresources {
            block.set_str_list("subresources", subresources.clone());
        }
        if let Some(users) = &rule.users {
            block.set_str_list("users", users.clone());
        }
        if let Some(teams) = &rule.teams {
            block.set_str_list("teams", teams.clone());
        }
        blocks.push(block);
    }
    attrs.set_blocks("access", blocks);
}

pub fn encode_extra_access_rules(attrs: &Attributes) -> Result<Option<Vec<InstanceAccessRule>>> {
    let Some(blocks) = attrs.get_blocks("extra_access_rules")? else {
        return Ok(None);
    };
    if blocks.is_empty() {
        return Ok(None);
    }

    let mut rules = Vec::with_capacity(blocks.len());
    for block in blocks {
        rules.push(InstanceAccessRule {
            users: block.get_str_list("users")?.map(<[String]>::to_vec),
            teams: block.get_str_list("teams")?.map(<[String]>::to_vec),
            cluster_role: block.get_str("cluster_role")?.map(str::to_string),
        });
    }
    Ok(Some(rules))
}

pub fn decode_extra_access_rules(rules: Option<&Vec<InstanceAccessRule>>, attrs: &mut Attributes) {
    let Some(rules) = rules else { return };
    if rules.is_empty() {
        return;
    }

    let mut blocks = Vec::with_capacity(rules.len());
    for rule in rules {
        let mut block = Attributes::new();
        if let Some(users) = &rule.users {
            block.set_str_list("users", users.clone());
        }
        if let Some(teams) = &rule.teams {
            block.set_str_list("teams", teams.clone());
        }
        if let Some(cluster_role) = &rule.cluster_role {
            block.set_str("cluster_role", cluster_role);
        }
        blocks.push(block);
    }
    attrs.set_blocks("extra_access_rules", blocks);
}
