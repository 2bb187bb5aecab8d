use std::collections::HashMap;

use super::{TypeError, TypeId, TypeRegistry};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberLayout {
    pub name: String,
    pub ty: TypeId,
    pub offset: usize,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecordLayout {
    /// Members in declaration order
    pub members: Vec<MemberLayout>,
    pub member_types: HashMap<String, TypeId>,
    pub alignment: usize,
    pub size: usize,
    pub defined: bool,
}

impl RecordLayout {
    pub fn member(&self, name: &str) -> Option<&MemberLayout> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.member(name).map(|m| m.offset)
    }
}

fn align_up(offset: usize, alignment: usize) -> usize {
    offset.next_multiple_of(alignment)
}

pub(super) fn compute(
    registry: &TypeRegistry,
    record: &str,
    members: Vec<(String, TypeId)>,
) -> Result<RecordLayout, TypeError> {
    let mut layout = RecordLayout {
        alignment: 1,
        defined: true,
        ..RecordLayout::default()
    };
    let mut offset = 0;

    for (name, ty) in members {
        let info = registry
            .get(ty)
            .filter(|info| info.is_complete())
            .ok_or_else(|| TypeError::IncompleteMember {
                record: record.to_owned(),
                member: name.clone(),
                ty: registry.name_of(ty).to_owned(),
            })?;
        let alignment = info.alignment();
        offset = align_up(offset, alignment);
        layout.alignment = layout.alignment.max(alignment);
        layout.member_types.insert(name.clone(), ty);
        layout.members.push(MemberLayout { name, ty, offset });
        offset += info.size;
    }

    layout.size = align_up(offset, layout.alignment);
    Ok(layout)
}
