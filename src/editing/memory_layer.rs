use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

use crate::bounding_volume::Aabb;
use crate::editing::{FeatureStore, SplitProvenance, StoreError};
use crate::feature::{AttributeValue, Feature, FeatureId};
use crate::math::{Point, Real};
use crate::query::SplitTolerances;
use crate::shape::{Geometry, LineString, Part, Polygon, Segment};

/// A default-value rule: computes the value of a field of a new feature from the
/// feature it is split from and the provenance of the split.
pub type DefaultValueFn = dyn Fn(&Feature, &SplitProvenance) -> AttributeValue;

/// A field of a [`MemoryLayer`].
pub struct Field {
    name: String,
    default_value: Option<Box<DefaultValueFn>>,
}

impl Field {
    /// A field without default-value rule.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_value: None,
        }
    }

    /// A field with a default-value rule.
    pub fn with_default(
        name: impl Into<String>,
        rule: impl Fn(&Feature, &SplitProvenance) -> AttributeValue + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            default_value: Some(Box::new(rule)),
        }
    }

    /// The name of this field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Does this field have a default-value rule?
    pub fn has_default_value(&self) -> bool {
        self.default_value.is_some()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("has_default_value", &self.has_default_value())
            .finish()
    }
}

#[derive(Clone, Debug)]
struct EditCommand {
    text: String,
    features: BTreeMap<FeatureId, Feature>,
    next_id: i64,
    num_topological_points: usize,
}

/// An in-memory [`FeatureStore`].
///
/// Features are kept ordered by identifier. An edit command snapshots the
/// features when it begins; destroying it restores that snapshot.
#[derive(Debug)]
pub struct MemoryLayer {
    fields: Vec<Field>,
    features: BTreeMap<FeatureId, Feature>,
    next_id: i64,
    selection: HashSet<FeatureId>,
    edit_command: Option<EditCommand>,
    history: Vec<String>,
    topological_points: Vec<Point<Real>>,
    read_only: bool,
    epsilon: Real,
}

impl MemoryLayer {
    /// An empty layer with the given fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            features: BTreeMap::new(),
            next_id: 1,
            selection: HashSet::new(),
            edit_command: None,
            history: Vec::new(),
            topological_points: Vec::new(),
            read_only: false,
            epsilon: SplitTolerances::default().epsilon,
        }
    }

    /// Adds a feature outside of any edit command.
    pub fn insert(
        &mut self,
        geometry: Option<Geometry>,
        attributes: Vec<AttributeValue>,
    ) -> Result<FeatureId, StoreError> {
        self.check_attributes(&attributes)?;
        let id = self.fresh_id();
        let _ = self
            .features
            .insert(id, Feature::new(id, geometry, attributes));
        Ok(id)
    }

    /// The fields of this layer.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The index of the field named `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// The feature with identifier `id`.
    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(&id)
    }

    /// All the features, ordered by identifier.
    pub fn features(&self) -> impl ExactSizeIterator<Item = &Feature> {
        self.features.values()
    }

    /// The number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Does this layer have no feature?
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Is an edit command in progress?
    pub fn is_editing(&self) -> bool {
        self.edit_command.is_some()
    }

    /// The texts of the committed edit commands, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The topological points registered so far.
    pub fn topological_points(&self) -> &[Point<Real>] {
        &self.topological_points
    }

    /// Makes every modification of the features fail with [`StoreError::Rejected`].
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Sets the distance under which a topological point is considered on a boundary.
    pub fn set_epsilon(&mut self, epsilon: Real) {
        self.epsilon = epsilon;
    }

    fn fresh_id(&mut self) -> FeatureId {
        let id = FeatureId(self.next_id);
        self.next_id += 1;
        id
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.read_only {
            Err(StoreError::Rejected("the layer is read-only".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_attributes(&self, attributes: &[AttributeValue]) -> Result<(), StoreError> {
        if attributes.len() != self.fields.len() {
            Err(StoreError::AttributeCountMismatch {
                expected: self.fields.len(),
                found: attributes.len(),
            })
        } else {
            Ok(())
        }
    }
}

impl FeatureStore for MemoryLayer {
    fn selected_ids(&self) -> Vec<FeatureId> {
        let mut ids: Vec<_> = self.selection.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn select_by_ids(&mut self, ids: &[FeatureId]) {
        self.selection = ids.iter().copied().collect();
    }

    fn remove_selection(&mut self) {
        self.selection.clear();
    }

    fn features_in_aabb(&self, aabb: &Aabb) -> Vec<Feature> {
        self.features
            .values()
            .filter(|f| {
                f.geometry
                    .as_ref()
                    .and_then(Geometry::local_aabb)
                    .is_some_and(|bounds| bounds.intersects(aabb))
            })
            .cloned()
            .collect()
    }

    fn begin_edit_command(&mut self, text: &str) -> Result<(), StoreError> {
        if self.edit_command.is_some() {
            return Err(StoreError::EditCommandInProgress);
        }

        self.edit_command = Some(EditCommand {
            text: text.to_string(),
            features: self.features.clone(),
            next_id: self.next_id,
            num_topological_points: self.topological_points.len(),
        });
        Ok(())
    }

    fn end_edit_command(&mut self) -> Result<(), StoreError> {
        let command = self.edit_command.take().ok_or(StoreError::NoEditCommand)?;
        self.history.push(command.text);
        Ok(())
    }

    fn destroy_edit_command(&mut self) -> Result<(), StoreError> {
        let command = self.edit_command.take().ok_or(StoreError::NoEditCommand)?;
        self.features = command.features;
        self.next_id = command.next_id;
        self.topological_points
            .truncate(command.num_topological_points);
        Ok(())
    }

    fn update_feature(&mut self, feature: Feature) -> Result<(), StoreError> {
        self.check_writable()?;
        self.check_attributes(&feature.attributes)?;

        let slot = self
            .features
            .get_mut(&feature.id)
            .ok_or(StoreError::UnknownFeature(feature.id))?;
        *slot = feature;
        Ok(())
    }

    fn delete_feature(&mut self, id: FeatureId) -> Result<(), StoreError> {
        self.check_writable()?;
        let _ = self
            .features
            .remove(&id)
            .ok_or(StoreError::UnknownFeature(id))?;
        let _ = self.selection.remove(&id);
        Ok(())
    }

    fn add_features(&mut self, features: Vec<Feature>) -> Result<Vec<FeatureId>, StoreError> {
        self.check_writable()?;
        for feature in &features {
            self.check_attributes(&feature.attributes)?;
        }

        let mut ids = Vec::with_capacity(features.len());

        for mut feature in features {
            feature.id = self.fresh_id();
            ids.push(feature.id);
            let _ = self.features.insert(feature.id, feature);
        }

        Ok(ids)
    }

    fn add_topological_point(&mut self, point: &Point<Real>) -> usize {
        let eps = self.epsilon;
        let mut inserted = 0;

        for feature in self.features.values_mut() {
            let Some(geometry) = &feature.geometry else {
                continue;
            };

            if !geometry
                .local_aabb()
                .is_some_and(|aabb| aabb.loosened(eps).contains_local_point(point))
            {
                continue;
            }

            let multipart = geometry.is_multipart();
            let parts = geometry
                .parts()
                .iter()
                .map(|part| match part {
                    Part::LineString(line) => {
                        let mut points = line.points().to_vec();
                        inserted += insert_vertex(&mut points, false, point, eps);
                        Part::LineString(LineString::new(points))
                    }
                    Part::Polygon(poly) => {
                        let mut vertices = poly.vertices().to_vec();
                        inserted += insert_vertex(&mut vertices, true, point, eps);
                        Part::Polygon(Polygon::new(vertices))
                    }
                })
                .collect();

            feature.geometry = Some(Geometry::from_parts(parts, multipart));
        }

        self.topological_points.push(*point);
        inserted
    }

    fn num_fields(&self) -> usize {
        self.fields.len()
    }

    fn has_default_value(&self, field: usize) -> bool {
        self.fields
            .get(field)
            .is_some_and(Field::has_default_value)
    }

    fn default_value(
        &self,
        field: usize,
        feature: &Feature,
        provenance: &SplitProvenance,
    ) -> AttributeValue {
        self.fields
            .get(field)
            .and_then(|f| f.default_value.as_ref())
            .map(|rule| rule(feature, provenance))
            .unwrap_or_default()
    }
}

/// Inserts `pt` in the first edge of `points` passing through it, unless it is
/// already a vertex. Returns the number of inserted vertices (0 or 1).
fn insert_vertex(points: &mut Vec<Point<Real>>, closed: bool, pt: &Point<Real>, eps: Real) -> usize {
    if points.iter().any(|p| na::distance(p, pt) <= eps) {
        return 0;
    }

    let n = points.len();
    let num_edges = if closed { n } else { n.saturating_sub(1) };

    for i in 0..num_edges {
        let edge = Segment::new(points[i], points[(i + 1) % n]);
        if edge.project_local_point(pt).1 <= eps {
            points.insert(i + 1, *pt);
            return 1;
        }
    }

    0
}
