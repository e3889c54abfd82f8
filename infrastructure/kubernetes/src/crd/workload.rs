use domain_cluster::model::vo::{MemberHost, VolumeClaim};
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Pod};
use kube::ResourceExt;

use super::object_meta;
use crate::client::KubeMapped;

impl KubeMapped<MemberHost> for Pod {
    fn into_domain(self) -> anyhow::Result<MemberHost> {
        Ok(MemberHost {
            name: self.name_any(),
            namespace: self.namespace().unwrap_or_default(),
        })
    }

    fn from_domain(host: &MemberHost) -> anyhow::Result<Self> {
        Ok(Pod {
            metadata: object_meta(&host.namespace, &host.name),
            ..Default::default()
        })
    }
}

impl KubeMapped<VolumeClaim> for PersistentVolumeClaim {
    fn into_domain(self) -> anyhow::Result<VolumeClaim> {
        Ok(VolumeClaim {
            name: self.name_any(),
            namespace: self.namespace().unwrap_or_default(),
        })
    }

    fn from_domain(claim: &VolumeClaim) -> anyhow::Result<Self> {
        Ok(PersistentVolumeClaim {
            metadata: object_meta(&claim.namespace, &claim.name),
            ..Default::default()
        })
    }
}
