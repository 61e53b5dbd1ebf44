// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Template codec.

use crate::attrs::Attributes;
use crate::codec::metadata;
use crate::error::Result;
use crate::filter::KeyFilter;
use crate::types::template::{Template, TemplateParameter, TemplateSpec};

pub fn encode(attrs: &Attributes) -> Result<Template> {
    Ok(Template {
        metadata: metadata::encode_metadata(attrs)?,
        spec: encode_spec(attrs)?,
    })
}

pub fn encode_spec(attrs: &Attributes) -> Result<TemplateSpec> {
    Ok(TemplateSpec {
        display_name: attrs.get_str("display_name")?.map(str::to_string),
        description: attrs.get_str("description")?.map(str::to_string),
        objects: attrs.get_str("objects")?.map(str::to_string),
        parameters: encode_parameters(attrs)?,
    })
}

/// Parameters are presented to users in list order, which is preserved.
fn encode_parameters(attrs: &Attributes) -> Result<Option<Vec<TemplateParameter>>> {
    let Some(blocks) = attrs.get_blocks("parameters")? else {
        return Ok(None);
    };
    if blocks.is_empty() {
        return Ok(None);
    }

    let mut parameters = Vec::with_capacity(blocks.len());
    for block in blocks {
        parameters.push(TemplateParameter {
            variable: block.get_str("variable")?.map(str::to_string),
            label: block.get_str("label")?.map(str::to_string),
            description: block.get_str("description")?.map(str::to_string),
            required: block.get_bool("required")?,
            default_value: block.get_str("default_value")?.map(str::to_string),
            options: block.get_str_list("options")?.map(<[String]>::to_vec),
        });
    }
    Ok(Some(parameters))
}

pub fn decode(template: &Template, filter: &KeyFilter, prior: &Attributes) -> Result<Attributes> {
    let mut attrs = Attributes::new();

    let keep_annotations = metadata::keep_set(prior, "annotations")?;
    let keep_labels = metadata::keep_set(prior, "labels")?;
    metadata::decode_metadata(
        &template.metadata,
        filter,
        &keep_annotations,
        &keep_labels,
        &mut attrs,
    )?;

    let spec = &template.spec;
    if let Some(display_name) = &spec.display_name {
        attrs.set_str("display_name", display_name);
    }
    if let Some(description) = &spec.description {
        attrs.set_str("description", description);
    }
    if let Some(objects) = &spec.objects {
        attrs.set_str("objects", objects);
    }
    decode_parameters(spec.parameters.as_ref(), &mut attrs);

    Ok(attrs)
}

fn decode_parameters(parameters: Option<&Vec<TemplateParameter>>, attrs: &mut Attributes) {
    let Some(parameters) = parameters else { return };
    if parameters.is_empty() {
        return;
    }

    let mut blocks = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        let mut block = Attributes::new();
        if let Some(variable) = &parameter.variable {
            block.set_str("variable", variable);
        }
        if let Some(label) = &parameter.label {
            block.set_str("label", label);
        }
        if let Some(description) = &parameter.description {
            block.set_str("description", description);
        }
        if let Some(required) = parameter.required {
            block.set_bool("required", required);
        }
        if let Some(default_value) = &parameter.default_value {
            block.set_str("default_value", default_value);
        }
        if let Some(options) = &parameter.options {
            block.set_str_list("options", options.clone());
        }
        blocks.push(block);
    }
    attrs.set_blocks("parameters", blocks);
}
