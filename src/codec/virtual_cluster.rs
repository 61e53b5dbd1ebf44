// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Virtual cluster codec.

use crate::attrs::Attributes;
use crate::codec::{common, metadata};
use crate::error::Result;
use crate::filter::KeyFilter;
use crate::types::virtual_cluster::{
    VirtualCluster, VirtualClusterHelmChart, VirtualClusterHelmRelease, VirtualClusterSpec,
};

pub fn encode(attrs: &Attributes) -> Result<VirtualCluster> {
    Ok(VirtualCluster {
        metadata: metadata::encode_metadata(attrs)?,
        spec: encode_spec(attrs)?,
    })
}

pub fn encode_spec(attrs: &Attributes) -> Result<VirtualClusterSpec> {
    Ok(VirtualClusterSpec {
        helm_release: encode_helm_release(attrs)?,
        access: common::encode_access(attrs)?,
        objects: attrs.get_str("objects")?.map(str::to_string),
    })
}

pub fn encode_helm_release(attrs: &Attributes) -> Result<Option<VirtualClusterHelmRelease>> {
    let Some(block) = attrs.get_block("helm_release")? else {
        return Ok(None);
    };

    let release = VirtualClusterHelmRelease {
        chart: encode_helm_chart(block)?,
        values: block.get_str("values")?.map(str::to_string),
    };

    if release == VirtualClusterHelmRelease::default() {
        return Ok(None);
    }
    Ok(Some(release))
}

fn encode_helm_chart(block: &Attributes) -> Result<Option<VirtualClusterHelmChart>> {
    let Some(chart_block) = block.get_block("chart")? else {
        return Ok(None);
    };

    let chart = VirtualClusterHelmChart {
        name: chart_block.get_str("name")?.map(str::to_string),
        version: chart_block.get_str("version")?.map(str::to_string),
        repo: chart_block.get_str("repo")?.map(str::to_string),
    };

    if chart == VirtualClusterHelmChart::default() {
        return Ok(None);
    }
    Ok(Some(chart))
}

pub fn decode(
    virtual_cluster: &VirtualCluster,
    filter: &KeyFilter,
    prior: &Attributes,
) -> Result<Attributes> {
    let mut attrs = Attributes::new();

    let keep_annotations = metadata::keep_set(prior, "annotations")?;
    let keep_labels = metadata::keep_set(prior, "labels")?;
    metadata::decode_metadata(
        &virtual_cluster.metadata,
        filter,
        &keep_annotations,
        &keep_labels,
        &mut attrs,
    )?;

    decode_helm_release(virtual_cluster.spec.helm_release.as_ref(), &mut attrs);
    common::decode_access(virtual_cluster.spec.access.as_ref(), &mut attrs);
    if let Some(objects) = &virtual_cluster.spec.objects {
        attrs.set_str("objects", objects);
    }

    Ok(attrs)
}

pub fn decode_helm_release(release: Option<&VirtualClusterHelmRelease>, attrs: &mut Attributes) {
    let Some(release) = release else { return };
    if *release == VirtualClusterHelmRelease::default() {
        return;
    }

    let mut block = Attributes::new();
    if let Some(chart) = &release.chart {
        if *chart != VirtualClusterHelmChart::default() {
            let mut chart_block = Attributes::new();
            if let Some(name) = &chart.name {
                chart_block.set_str("name", name);
            }
            if let Some(version) = &chart.version {
                chart_block.set_str("version", version);
            }
            if let Some(repo) = &chart.repo {
                chart_block.set_str("repo", repo);
            }
            block.set_block("chart", chart_block);
        }
    }
    if let Some(values) = &release.values {
        block.set_str("values", values);
    }
    attrs.set_block("helm_release", block);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helm_release_attrs() -> Attributes {
        let mut chart = Attributes::new();
        chart.set_str("name", "vcluster");
        chart.set_str("version", "0.15.0");
        chart.set_str("repo", "https://charts.geeko.me");
        let mut release = Attributes::new();
        release.set_block("chart", chart);
        release.set_str("values", "sync:\n  ingresses:\n    enabled: true");
        let mut attrs = Attributes::new();
        attrs.set_str("name", "my-vcluster");
        attrs.set_str("namespace", "team-a");
        attrs.set_block("helm_release", release);
        attrs
    }

    #[test]
    fn test_encode_helm_release() {
        let spec = encode_spec(&helm_release_attrs()).unwrap();

        let release = spec.helm_release.unwrap();
        let chart = release.chart.unwrap();
        assert_eq!(chart.name.as_deref(), Some("vcluster"));
        assert_eq!(chart.version.as_deref(), Some("0.15.0"));
        assert!(release.values.unwrap().contains("ingresses"));
    }

    #[test]
    fn test_empty_helm_release_block_encodes_to_none() {
        let mut attrs = Attributes::new();
        attrs.set_block("helm_release", Attributes::new());

        assert_eq!(encode_helm_release(&attrs).unwrap(), None);
    }

    #[test]
    fn test_round_trip() {
        let mut access_rule = Attributes::new();
        access_rule.set_str("name", "allow-devs");
        access_rule.set_str_list("verbs", vec!["get".to_string()]);
        access_rule.set_str_list("users", vec!["alice".to_string()]);

        let mut attrs = helm_release_attrs();
        attrs.set_blocks("access", vec![access_rule]);

        let virtual_cluster = encode(&attrs).unwrap();
        let decoded = decode(&virtual_cluster, &KeyFilter::default(), &Attributes::new()).unwrap();

        assert_eq!(decoded, attrs);
    }

    #[test]
    fn test_all_default_release_decodes_to_absent_entry() {
        let mut attrs = Attributes::new();
        decode_helm_release(Some(&VirtualClusterHelmRelease::default()), &mut attrs);
        assert!(attrs.is_empty());
    }
}
