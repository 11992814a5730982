/*!
# VTO 3D Viewer - OBJ Loader

Wavefront OBJ backend for the viewer's `MeshFormatLoader` capability.

Loads and parses OBJ assets on a background thread, reporting
byte-fraction progress over the load channel. Accepts plain filesystem
paths and `file://` URLs; network transport is out of scope (URLs are
resolved locally).
*/

mod obj_loader;

pub use obj_loader::ObjMeshLoader;
