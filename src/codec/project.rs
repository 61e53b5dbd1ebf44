// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Project codec.

use crate::attrs::Attributes;
use crate::codec::{common, metadata};
use crate::error::Result;
use crate::filter::KeyFilter;
use crate::types::project::{
    AllowedCluster, AllowedTemplate, NamespacePattern, Project, ProjectMember, ProjectQuotas,
    ProjectSpec,
};

pub fn encode(attrs: &Attributes) -> Result<Project> {
    Ok(Project {
        metadata: metadata::encode_metadata(attrs)?,
        spec: encode_spec(attrs)?,
    })
}

pub fn encode_spec(attrs: &Attributes) -> Result<ProjectSpec> {
    Ok(ProjectSpec {
        display_name: attrs.get_str("display_name")?.map(str::to_string),
        description: attrs.get_str("description")?.map(str::to_string),
        owner: common::encode_owner(attrs)?,
        members: encode_members(attrs)?,
        quotas: encode_quotas(attrs)?,
        allowed_clusters: encode_allowed_clusters(attrs)?,
        allowed_templates: encode_allowed_templates(attrs)?,
        namespace_pattern: encode_namespace_pattern(attrs)?,
    })
}

fn encode_members(attrs: &Attributes) -> Result<Option<Vec<ProjectMember>>> {
    let Some(blocks) = attrs.get_blocks("members")? else {
        return Ok(None);
    };
    if blocks.is_empty() {
        return Ok(None);
    }

    let mut members = Vec::with_capacity(blocks.len());
    for block in blocks {
        members.push(ProjectMember {
            kind: block.get_str("kind")?.map(str::to_string),
            group: block.get_str("group")?.map(str::to_string),
            name: block.get_str("name")?.map(str::to_string),
            cluster_role: block.get_str("cluster_role")?.map(str::to_string),
        });
    }
    Ok(Some(members))
}

fn encode_quotas(attrs: &Attributes) -> Result<Option<ProjectQuotas>> {
    let Some(block) = attrs.get_block("quotas")? else {
        return Ok(None);
    };

    let quotas = ProjectQuotas {
        project: block.get_map("project")?.cloned().filter(|m| !m.is_empty()),
        user: block.get_map("user")?.cloned().filter(|m| !m.is_empty()),
    };

    if quotas == ProjectQuotas::default() {
        return Ok(None);
    }
    Ok(Some(quotas))
}

fn encode_allowed_clusters(attrs: &Attributes) -> Result<Option<Vec<AllowedCluster>>> {
    let Some(blocks) = attrs.get_blocks("allowed_clusters")? else {
        return Ok(None);
    };
    if blocks.is_empty() {
        return Ok(None);
    }

    let mut clusters = Vec::with_capacity(blocks.len());
    for block in blocks {
        clusters.push(AllowedCluster {
            name: block.get_str("name")?.map(str::to_string),
        });
    }
    Ok(Some(clusters))
}

fn encode_allowed_templates(attrs: &Attributes) -> Result<Option<Vec<AllowedTemplate>>> {
    let Some(blocks) = attrs.get_blocks("allowed_templates")? else {
        return Ok(None);
    };
    if blocks.is_empty() {
        return Ok(None);
    }

    let mut templates = Vec::with_capacity(blocks.len());
    for block in blocks {
        templates.push(AllowedTemplate {
            kind: block.get_str("kind")?.map(str::to_string),
            group: block.get_str("group")?.map(str::to_string),
            name: block.get_str("name")?.map(str::to_string),
            is_default: block.get_bool("is_default")?,
        });
    }
    Ok(Some(templates))
}

fn encode_namespace_pattern(attrs: &Attributes) -> Result<Option<NamespacePattern>> {
    let Some(block) = attrs.get_block("namespace_pattern")? else {
        return Ok(None);
    };

    let pattern = NamespacePattern {
        space: block.get_str("space")?.map(str::to_string),
        virtual_cluster: block.get_str("virtual_cluster")?.map(str::to_string),
    };

    if pattern == NamespacePattern::default() {
        return Ok(None);
    }
    Ok(Some(pattern))
}

pub fn decode(project: &Project, filter: &KeyFilter, prior: &Attributes) -> Result<Attributes> {
    let mut attrs = Attributes::new();

    let keep_annotations = metadata::keep_set(prior, "annotations")?;
    let keep_labels = metadata::keep_set(prior, "labels")?;
    metadata::decode_metadata(
        &project.metadata,
        filter,
        &keep_annotations,
        &keep_labels,
        &mut attrs,
    )?;

    let spec = &project.spec;
    if let Some(display_name) = &spec.display_name {
        attrs.set_str("display_name", display_name);
    }
    if let Some(description) = &spec.description {
        attrs.set_str("description", description);
    }
    common::decode_owner(spec.owner.as_ref(), &mut attrs);
    decode_members(spec.members.as_ref(), &mut attrs);
    decode_quotas(spec.quotas.as_ref(), &mut attrs);
    decode_allowed_clusters(spec.allowed_clusters.as_ref(), &mut attrs);
    decode_allowed_templates(spec.allowed_templates.as_ref(), &mut attrs);
    decode_namespace_pattern(spec.namespace_pattern.as_ref(), &mut attrs);

    Ok(attrs)
}

fn decode_members(members: Option<&Vec<ProjectMember>>, attrs: &mut Attributes) {
    let Some(members) = members else { return };
    if members.is_empty() {
        return;
    }

    let mut blocks = Vec::with_capacity(members.len());
    for member in members {
        let mut block = Attributes::new();
        if let Some(kind) = &member.kind {
            block.set_str("kind", kind);
        }
        if let Some(group) = &member.group {
            block.set_str("group", group);
        }
        if let Some(name) = &member.name {
            block.set_str("name", name);
        }
        if let Some(cluster_role) = &member.cluster_role {
            block.set_str("cluster_role", cluster_role);
        }
        blocks.push(block);
    }
    attrs.set_blocks("members", blocks);
}

fn decode_quotas(quotas: Option<&ProjectQuotas>, attrs: &mut Attributes) {
    let Some(quotas) = quotas else { return };
    if *quotas == ProjectQuotas::default() {
        return;
    }

    let mut block = Attributes::new();
    if let Some(project) = &quotas.project {
        block.set_map("project", project.clone());
    }
    if let Some(user) = &quotas.user {
        block.set_map("user", user.clone());
    }
    attrs.set_block("quotas", block);
}

fn decode_allowed_clusters(clusters: Option<&Vec<AllowedCluster>>, attrs: &mut Attributes) {
    let Some(clusters) = clusters else { return };
    if clusters.is_empty() {
        return;
    }

    let mut blocks = Vec::with_capacity(clusters.len());
    for cluster in clusters {
        let mut block = Attributes::new();
        if let Some(name) = &cluster.name {
            block.set_str("name", name);
        }
        blocks.push(block);
    }
    attrs.set_blocks("allowed_clusters", blocks);
}

fn decode_allowed_templates(templates: Option<&Vec<AllowedTemplate>>, attrs: &mut Attributes) {
    let Some(templates) = templates else { return };
    if templates.is_empty() {
        return;
    }

    let mut blocks = Vec::with_capacity(templates.len());
    for template in templates {
        let mut block = Attributes::new();
        if let Some(kind) = &template.kind {
            block.set_str("kind", kind);
        }
        if let Some(group) = &template.group {
            block.set_str("group", group);
        }
        if let Some(name) = &template.name {
            block.set_str("name", name);
        }
        if let Some(is_default) = template.is_default {
            block.set_bool("is_default", is_default);
        }
        blocks.push(block);
    }
    attrs.set_blocks("allowed_templates", blocks);
}

fn decode_namespace_pattern(pattern: Option<&NamespacePattern>, attrs: &mut Attributes) {
    let Some(pattern) = pattern else { return };
    if *pattern == NamespacePattern::default() {
        return;
    }

    let mut block = Attributes::new();
    if let Some(space) = &pattern.space {
        block.set_str("space", space);
    }
    if let Some(virtual_cluster) = &pattern.virtual_cluster {
        block.set_str("virtual_cluster", virtual_cluster);
    }
    attrs.set_block("namespace_pattern", block);
}
