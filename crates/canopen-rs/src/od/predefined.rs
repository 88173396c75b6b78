use super::ObjectDictionary;
use super::constants::{
    IDX_DEVICE_TYPE_U32, IDX_ERROR_REGISTER_U8, IDX_IDENTITY_OBJECT_REC,
    SUBIDX_IDENTITY_PRODUCT_CODE, SUBIDX_IDENTITY_REVISION_NUMBER, SUBIDX_IDENTITY_SERIAL_NUMBER,
    SUBIDX_IDENTITY_VENDOR_ID,
};
use super::datatype::DataType;
use super::object::Record;
use super::variable::{AccessType, Variable};
use crate::CanopenError;

/// Populates the OD with the mandatory communication profile objects every
/// node carries. Device-specific objects are left to the user to insert.
pub(crate) fn populate_communication_objects(
    od: &mut ObjectDictionary,
) -> Result<(), CanopenError> {
    // Device Type (1000h)
    od.insert(
        IDX_DEVICE_TYPE_U32,
        Variable::new(DataType::Unsigned32, AccessType::ReadOnly).with_name("Device type"),
    );

    // Error Register (1001h)
    od.insert(
        IDX_ERROR_REGISTER_U8,
        Variable::new(DataType::Unsigned8, AccessType::ReadOnly).with_name("Error register"),
    );

    // Identity Object (1018h)
    let mut identity = Record::new(Some("Identity object"));
    identity.set(
        SUBIDX_IDENTITY_VENDOR_ID,
        Variable::new(DataType::Unsigned32, AccessType::ReadOnly).with_name("Vendor-ID"),
    )?;
    identity.set(
        SUBIDX_IDENTITY_PRODUCT_CODE,
        Variable::new(DataType::Unsigned32, AccessType::ReadOnly).with_name("Product code"),
    )?;
    identity.set(
        SUBIDX_IDENTITY_REVISION_NUMBER,
        Variable::new(DataType::Unsigned32, AccessType::ReadOnly).with_name("Revision number"),
    )?;
    identity.set(
        SUBIDX_IDENTITY_SERIAL_NUMBER,
        Variable::new(DataType::Unsigned32, AccessType::ReadOnly).with_name("Serial number"),
    )?;
    od.insert(IDX_IDENTITY_OBJECT_REC, identity);

    Ok(())
}
