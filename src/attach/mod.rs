//! 绑定模块

mod policy;

pub use policy::{
    AttachmentPolicy, AttachmentRecord, UniformRandomAttachment, load_per_cell, plan_attachments,
};
